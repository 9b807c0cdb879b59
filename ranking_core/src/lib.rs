/*!

Decoding of image rankings submitted as compact ranking lines.

The interactive client lets a student sort a shuffled grid of images and
exports the final order as a single line:

```text
M45_2026,525,002,694
```

The first field is the object being ranked, the other fields are the filename
numbers of the images, best first. The filename numbers are the obfuscated
suffixes of the image files (`bcw-525.jpg` has the number `525` and belongs to
the contributor `bcw`).

This crate turns such lines back into contributor rankings:

```
use ranking_core::*;

let manifest = Manifest {
    objects: vec![(
        "X".to_string(),
        ObjectEntry {
            images: vec!["aaa-001.jpg".to_string(), "bbb-002.jpg".to_string()],
            ..Default::default()
        },
    )],
};
let index = build_index(&manifest, DuplicateNumberPolicy::Reject)?;

let first = parse_ranking_line("X,002,001", &index)?;
let second = parse_ranking_line("X,001,002", &index)?;
assert_eq!(first.rankings[0].initials, "bbb");

let agg = aggregate(&[first, second]);
let stats = agg.get("X").unwrap();
assert_eq!(stats.get("aaa").unwrap().ranks, vec![2, 1]);
assert_eq!(stats.get("aaa").unwrap().average_rank(), 1.5);
// A tie follows the manifest listing.
assert_eq!(stats.leaderboard()[0].initials, "aaa");
# Ok::<(), RankingError>(())
```

See the [manual] for the file formats and the command line tool.
*/
mod config;
use log::{debug, warn};

use std::collections::HashMap;

pub use crate::config::*;

pub mod board;
pub mod manual;
pub mod report;
pub mod view;

// **** Filenames ****

/// Removes the extension of a filename: `bcw-525.jpg` -> `bcw-525`.
///
/// A trailing dot with nothing after it is not an extension.
pub fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx + 1 < filename.len() => &filename[..idx],
        _ => filename,
    }
}

/// The contributor part of a filename: `edh-188.jpg` -> `edh`, `edh.jpg` -> `edh`.
pub fn extract_initials(filename: &str) -> &str {
    let stem = strip_extension(filename);
    match stem.split_once('-') {
        Some((initials, _)) => initials,
        None => stem,
    }
}

/// The filename number: `bcw-525.jpg` -> `525`, `edh.jpg` -> none.
///
/// With several dashes, the number is the last token.
pub fn extract_filename_number(filename: &str) -> Option<&str> {
    strip_extension(filename)
        .rsplit_once('-')
        .map(|(_, number)| number)
}

// **** Manifest index ****

/// Builds the reverse lookup object -> filename number -> initials.
///
/// Images without a number are not indexable and are skipped. Duplicated
/// numbers within one object are resolved with `policy`.
pub fn build_index(
    manifest: &Manifest,
    policy: DuplicateNumberPolicy,
) -> Result<ManifestIndex, RankingError> {
    let mut objects: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut positions: HashMap<String, HashMap<String, usize>> = HashMap::new();
    for (object, entry) in manifest.objects.iter() {
        let mut numbers: HashMap<String, String> = HashMap::new();
        let mut firsts: HashMap<String, usize> = HashMap::new();
        // The filename that currently holds each number.
        let mut holders: HashMap<&str, &str> = HashMap::new();
        for (pos, filename) in entry.images.iter().enumerate() {
            let initials = extract_initials(filename);
            if !initials.is_empty() {
                firsts.entry(initials.to_string()).or_insert(pos);
            }
            let number = match extract_filename_number(filename) {
                Some(n) => n,
                None => {
                    debug!("build_index: {}: no number in {:?}", object, filename);
                    continue;
                }
            };
            if let Some(first) = holders.get(number).copied() {
                match policy {
                    DuplicateNumberPolicy::Reject => {
                        return Err(RankingError::DuplicateNumber {
                            object: object.clone(),
                            number: number.to_string(),
                            first: first.to_string(),
                            second: filename.clone(),
                        });
                    }
                    DuplicateNumberPolicy::FirstWins => {
                        warn!(
                            "Duplicate number {} for object {}: keeping {}, ignoring {}",
                            number, object, first, filename
                        );
                        continue;
                    }
                    DuplicateNumberPolicy::LastWins => {
                        warn!(
                            "Duplicate number {} for object {}: {} replaces {}",
                            number, object, filename, first
                        );
                    }
                }
            }
            holders.insert(number, filename);
            numbers.insert(number.to_string(), initials.to_string());
        }
        debug!(
            "build_index: {}: {} numbered images out of {}",
            object,
            numbers.len(),
            entry.images.len()
        );
        objects.insert(object.clone(), numbers);
        positions.insert(object.clone(), firsts);
    }
    Ok(ManifestIndex { objects, positions })
}

// **** Ranking lines ****

/// Parses one ranking line `object,number,number,...` against the index.
///
/// Numbers that are not in the index are kept with the initials
/// [`UNKNOWN_INITIALS`] and reported as a warning.
pub fn parse_ranking_line(
    line: &str,
    index: &ManifestIndex,
) -> Result<DecodedRanking, RankingError> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 2 {
        return Err(RankingError::MalformedLine {
            line: line.to_string(),
        });
    }

    let object = parts[0];
    let numbers = index
        .objects
        .get(object)
        .ok_or_else(|| RankingError::UnknownObject {
            object: object.to_string(),
        })?;

    let rankings: Vec<RankEntry> = parts[1..]
        .iter()
        .enumerate()
        .map(|(idx, number)| {
            let (initials, manifest_position) = match numbers.get(*number) {
                // An image named `-001.jpg` has empty initials, which cannot be told apart
                // from a missing image.
                Some(initials) if !initials.is_empty() => {
                    (initials.clone(), index.manifest_position(object, initials))
                }
                _ => {
                    warn!("Unknown number {} for object {}", number, object);
                    (UNKNOWN_INITIALS.to_string(), None)
                }
            };
            RankEntry {
                rank: (idx + 1) as u32,
                number: number.to_string(),
                initials,
                manifest_position,
            }
        })
        .collect();

    debug!("parse_ranking_line: {}: {} entries", object, rankings.len());
    Ok(DecodedRanking {
        object: object.to_string(),
        rankings,
    })
}

// **** Aggregation ****

/// Contributor statistics for all the objects seen so far.
///
/// Objects and contributors are kept in order of first appearance. Leaderboard
/// ties are broken by the manifest position carried by each entry.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Aggregate {
    objects: Vec<ObjectStats>,
}

impl Aggregate {
    pub fn new() -> Aggregate {
        Aggregate::default()
    }

    /// Folds one submission into the statistics.
    pub fn add(&mut self, ranking: &DecodedRanking) {
        let obj_idx = match self.objects.iter().position(|o| o.object == ranking.object) {
            Some(idx) => idx,
            None => {
                self.objects.push(ObjectStats {
                    object: ranking.object.clone(),
                    contributors: Vec::new(),
                });
                self.objects.len() - 1
            }
        };
        let contributors = &mut self.objects[obj_idx].contributors;
        for entry in ranking.rankings.iter() {
            let c_idx = match contributors
                .iter()
                .position(|c| c.initials == entry.initials)
            {
                Some(idx) => idx,
                None => {
                    contributors.push(ContributorStats::new(
                        &entry.initials,
                        entry.manifest_position,
                    ));
                    contributors.len() - 1
                }
            };
            contributors[c_idx].record(entry.rank);
        }
    }

    pub fn objects(&self) -> &[ObjectStats] {
        &self.objects
    }

    pub fn get(&self, object: &str) -> Option<&ObjectStats> {
        self.objects.iter().find(|o| o.object == object)
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Aggregates all the submissions, in the given order.
pub fn aggregate(rankings: &[DecodedRanking]) -> Aggregate {
    let mut agg = Aggregate::new();
    for r in rankings.iter() {
        agg.add(r);
    }
    debug!(
        "aggregate: {} submissions over {} objects",
        rankings.len(),
        agg.objects.len()
    );
    agg
}
