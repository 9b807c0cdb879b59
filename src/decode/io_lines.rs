// Acquisition of the ranking lines.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::decode::*;

/// Where the ranking lines come from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum InputSource {
    /// A single ranking line given on the command line.
    Literal(String),
    /// A file with one ranking line per line.
    File(PathBuf),
    /// Ranking lines piped on the standard input.
    Stdin,
}

/// Picks the input source. An argument that names an existing path is a file,
/// anything else is a ranking line.
///
/// Returns nothing when there is no argument and the standard input is a terminal:
/// there is nothing to read.
pub fn resolve_input(arg: Option<&str>, stdin_is_terminal: bool) -> Option<InputSource> {
    match arg {
        Some(s) if Path::new(s).exists() => Some(InputSource::File(PathBuf::from(s))),
        Some(s) => Some(InputSource::Literal(s.to_string())),
        None if stdin_is_terminal => None,
        None => Some(InputSource::Stdin),
    }
}

/// The non-blank lines of a reader, in order.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of failing
/// the read.
pub fn read_lines<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut res: Vec<String> = Vec::new();
    for bytes in reader.split(b'\n') {
        let bytes = bytes?;
        let text = String::from_utf8_lossy(&bytes);
        let line = text.strip_suffix('\r').unwrap_or(&text);
        if !line.trim().is_empty() {
            res.push(line.to_string());
        }
    }
    Ok(res)
}

/// The outcome of decoding a batch of lines.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Batch {
    pub submissions: Vec<DecodedRanking>,
    /// The lines that could not be decoded, with the reason.
    pub rejected: Vec<(String, RankingError)>,
}

/// Decodes every line independently. A bad line never stops the batch.
/// Blank lines are skipped and are not rejected.
pub fn decode_batch<'a, I>(lines: I, index: &ManifestIndex) -> Batch
where
    I: IntoIterator<Item = &'a str>,
{
    let mut batch = Batch::default();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match parse_ranking_line(line, index) {
            Ok(d) => batch.submissions.push(d),
            Err(e) => {
                warn!("decode_batch: rejected line {:?}: {}", line, e);
                batch.rejected.push((line.to_string(), e));
            }
        }
    }
    info!(
        "decode_batch: {} submissions, {} rejected lines",
        batch.submissions.len(),
        batch.rejected.len()
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn index() -> ManifestIndex {
        let manifest = Manifest {
            objects: vec![(
                "X".to_string(),
                ObjectEntry {
                    images: vec!["aaa-001.jpg".to_string(), "bbb-002.jpg".to_string()],
                    ..Default::default()
                },
            )],
        };
        build_index(&manifest, DuplicateNumberPolicy::Reject).unwrap()
    }

    #[test]
    fn resolve_sources() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let p = f.path().to_str().unwrap();
        assert_eq!(
            resolve_input(Some(p), true),
            Some(InputSource::File(f.path().to_path_buf()))
        );
        assert_eq!(
            resolve_input(Some("X,001,002"), true),
            Some(InputSource::Literal("X,001,002".to_string()))
        );
        assert_eq!(resolve_input(None, true), None);
        assert_eq!(resolve_input(None, false), Some(InputSource::Stdin));
    }

    #[test]
    fn read_lines_skips_blanks() {
        let lines = read_lines(Cursor::new("X,001\n\n   \nX,002\r\n")).unwrap();
        assert_eq!(lines, vec!["X,001".to_string(), "X,002".to_string()]);
    }

    #[test]
    fn read_lines_replaces_invalid_utf8() {
        let lines = read_lines(Cursor::new(b"X,002,001\nX,\xff01\r\nX,001,002".to_vec())).unwrap();
        assert_eq!(
            lines,
            vec![
                "X,002,001".to_string(),
                "X,\u{FFFD}01".to_string(),
                "X,001,002".to_string()
            ]
        );
    }

    #[test]
    fn batch_continues_after_errors() {
        let batch = decode_batch(
            ["X,002,001", "X", "", "Y,001", "X,001,002"].iter().copied(),
            &index(),
        );
        assert_eq!(batch.submissions.len(), 2);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].0, "X");
        assert!(matches!(
            batch.rejected[0].1,
            RankingError::MalformedLine { .. }
        ));
        assert!(matches!(
            batch.rejected[1].1,
            RankingError::UnknownObject { .. }
        ));
    }
}
