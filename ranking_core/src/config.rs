// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The initials recorded for a number that does not belong to any image of the object.
pub const UNKNOWN_INITIALS: &str = "UNKNOWN";

/// One object of the manifest: a named set of images to rank.
///
/// Only `images` matters for decoding. The other fields are display hints
/// for the interactive client.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ObjectEntry {
    pub folder: Option<String>,
    pub images: Vec<String>,
    pub grid_columns: Option<u32>,
}

/// All the objects that can be ranked, in the order they are listed.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Manifest {
    pub objects: Vec<(String, ObjectEntry)>,
}

impl Manifest {
    pub fn get(&self, object: &str) -> Option<&ObjectEntry> {
        self.objects
            .iter()
            .find(|(name, _)| name == object)
            .map(|(_, entry)| entry)
    }
}

/// Reverse lookup from the manifest: object -> filename number -> initials.
///
/// Built once with [`crate::build_index`] and never mutated afterwards.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ManifestIndex {
    pub(crate) objects: HashMap<String, HashMap<String, String>>,
    // object -> initials -> position of the first image of the contributor.
    pub(crate) positions: HashMap<String, HashMap<String, usize>>,
}

impl ManifestIndex {
    pub fn contains_object(&self, object: &str) -> bool {
        self.objects.contains_key(object)
    }

    /// The initials behind a filename number. Numbers are compared as strings,
    /// so `"007"` and `"7"` are different tokens.
    pub fn initials_for(&self, object: &str, number: &str) -> Option<&str> {
        self.objects
            .get(object)
            .and_then(|numbers| numbers.get(number))
            .map(|s| s.as_str())
    }

    /// Position in the manifest listing of the first image of this contributor.
    pub fn manifest_position(&self, object: &str, initials: &str) -> Option<usize> {
        self.positions
            .get(object)
            .and_then(|positions| positions.get(initials))
            .copied()
    }

    /// Number of decodable images for this object.
    pub fn len_of(&self, object: &str) -> Option<usize> {
        self.objects.get(object).map(|numbers| numbers.len())
    }

    pub fn object_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.objects.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// What to do when two images of the same object carry the same filename number.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum DuplicateNumberPolicy {
    /// Fail the index construction with [`RankingError::DuplicateNumber`].
    #[default]
    Reject,
    /// The image listed last keeps the number.
    LastWins,
    /// The image listed first keeps the number.
    FirstWins,
}

// ******** Decoded data structures *********

/// One position in a submission.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankEntry {
    /// 1-based position in the submitted sequence.
    pub rank: u32,
    pub number: String,
    pub initials: String,
    /// Position of the contributor's first image in the manifest, none for
    /// [`UNKNOWN_INITIALS`].
    pub manifest_position: Option<usize>,
}

/// One submission, as reconstructed from a ranking line.
///
/// No deduplication is done: a number submitted twice is ranked twice.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DecodedRanking {
    pub object: String,
    pub rankings: Vec<RankEntry>,
}

// ******** Output data structures *********

/// The ranks received by one contributor for one object, across all submissions.
#[derive(PartialEq, Debug, Clone)]
pub struct ContributorStats {
    pub initials: String,
    /// In the order the submissions were processed.
    pub ranks: Vec<u32>,
    pub total_rank: u64,
    pub count: u32,
    /// Breaks leaderboard ties. Contributors without a position come last.
    pub manifest_position: Option<usize>,
}

impl ContributorStats {
    pub(crate) fn new(initials: &str, manifest_position: Option<usize>) -> ContributorStats {
        ContributorStats {
            initials: initials.to_string(),
            ranks: Vec::new(),
            total_rank: 0,
            count: 0,
            manifest_position,
        }
    }

    pub(crate) fn record(&mut self, rank: u32) {
        self.ranks.push(rank);
        self.total_rank += rank as u64;
        self.count += 1;
    }

    /// Arithmetic mean of the raw ranks. Ranks from submissions of different
    /// lengths are not rescaled.
    pub fn average_rank(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_rank as f64 / self.count as f64
    }
}

/// All the contributor statistics of one object, in order of first appearance.
#[derive(PartialEq, Debug, Clone)]
pub struct ObjectStats {
    pub object: String,
    pub contributors: Vec<ContributorStats>,
}

impl ObjectStats {
    pub fn get(&self, initials: &str) -> Option<&ContributorStats> {
        self.contributors.iter().find(|c| c.initials == initials)
    }

    /// Contributors sorted by average rank, best first.
    ///
    /// Equal averages follow the order of the images in the manifest, with
    /// [`UNKNOWN_INITIALS`] last. The sort is stable for anything left.
    pub fn leaderboard(&self) -> Vec<&ContributorStats> {
        let mut sorted: Vec<&ContributorStats> = self.contributors.iter().collect();
        sorted.sort_by(|a, b| {
            a.average_rank()
                .total_cmp(&b.average_rank())
                .then_with(|| {
                    let pa = a.manifest_position.unwrap_or(usize::MAX);
                    let pb = b.manifest_position.unwrap_or(usize::MAX);
                    pa.cmp(&pb)
                })
        });
        sorted
    }
}

/// Errors that prevent a ranking line or a manifest from being used.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RankingError {
    /// Fewer than two comma-separated fields.
    MalformedLine { line: String },
    /// The first field is not an object of the manifest.
    UnknownObject { object: String },
    /// Two images of one object share a number, under [`DuplicateNumberPolicy::Reject`].
    DuplicateNumber {
        object: String,
        number: String,
        first: String,
        second: String,
    },
}

impl Error for RankingError {}

impl Display for RankingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingError::MalformedLine { .. } => {
                write!(f, "Invalid format: expected \"object,number,number,...\"")
            }
            RankingError::UnknownObject { object } => write!(f, "Unknown object: {}", object),
            RankingError::DuplicateNumber {
                object,
                number,
                first,
                second,
            } => write!(
                f,
                "Duplicate number {} for object {}: {} and {}",
                number, object, first, second
            ),
        }
    }
}
