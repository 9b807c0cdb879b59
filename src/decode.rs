use log::{debug, info, warn};

use ranking_core::report::render_report;
use ranking_core::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{BufRead, Write};

pub mod config_reader;
pub mod io_lines;

use crate::decode::config_reader::*;
use crate::decode::io_lines::*;

pub const USAGE: &str = "No input provided. Usage:
  decode-rankings \"M45_2026,525,002,694...\"
  decode-rankings submissions.txt
  cat submissions.txt | decode-rankings";

#[derive(Debug, Snafu)]
pub enum DecodeError {
    #[snafu(display("Error: {path} not found"))]
    ManifestMissing { path: String },
    #[snafu(display("Error reading manifest {path}: {source}"))]
    ReadingManifest {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing manifest {path}: {source}"))]
    ParsingManifest {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error in manifest: {source}"))]
    Index { source: RankingError },
    #[snafu(display(
        "Unknown duplicate number policy {value:?}: expected reject, last-wins or first-wins"
    ))]
    InvalidPolicy { value: String },
    #[snafu(display("Error reading {path}: {source}"))]
    ReadingInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the standard input: {source}"))]
    ReadingStdin { source: std::io::Error },
    #[snafu(display("Error parsing input: {source}"))]
    InvalidInput { source: RankingError },
    #[snafu(display("Error formatting the CSV export: {source}"))]
    RenderingCsv { source: csv::Error },
    #[snafu(display("Error writing the output: {source}"))]
    WritingOutput { source: std::io::Error },
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Reads the submissions from the source.
///
/// A single ranking line that fails to parse is an error. In files and piped input,
/// bad lines are reported on `err` and skipped.
fn read_submissions<R: BufRead, E: Write>(
    source: &InputSource,
    index: &ManifestIndex,
    stdin: R,
    err: &mut E,
) -> DecodeResult<Vec<DecodedRanking>> {
    let batch = match source {
        InputSource::Literal(line) => {
            let d = parse_ranking_line(line, index).context(InvalidInputSnafu {})?;
            return Ok(vec![d]);
        }
        InputSource::File(path) => {
            info!("Reading ranking lines from {:?}", path);
            let path_name = path.display().to_string();
            let content = fs::read(path).context(ReadingInputSnafu {
                path: path_name.clone(),
            })?;
            let lines = read_lines(content.as_slice())
                .context(ReadingInputSnafu { path: path_name })?;
            decode_batch(lines.iter().map(|s| s.as_str()), index)
        }
        InputSource::Stdin => {
            info!("Reading ranking lines from the standard input");
            let lines = read_lines(stdin).context(ReadingStdinSnafu {})?;
            decode_batch(lines.iter().map(|s| s.as_str()), index)
        }
    };
    for (line, e) in batch.rejected.iter() {
        writeln!(err, "Error parsing line: {}", line).context(WritingOutputSnafu {})?;
        writeln!(err, "  {}", e).context(WritingOutputSnafu {})?;
    }
    Ok(batch.submissions)
}

/// Runs the decoder: loads the manifest, decodes the input and writes the report.
///
/// `input` is `None` when there is nothing to read; the usage is printed instead.
pub fn run_decoder<R: BufRead, W: Write, E: Write>(
    input: Option<InputSource>,
    settings: &Settings,
    stdin: R,
    out: &mut W,
    err: &mut E,
) -> DecodeResult<()> {
    let manifest = read_manifest(&settings.config_path)?;
    let index = build_index(&manifest, settings.duplicate_policy).context(IndexSnafu {})?;
    debug!("run_decoder: objects {:?}", index.object_names());

    let source = match input {
        Some(s) => s,
        None => {
            writeln!(out, "{}", USAGE).context(WritingOutputSnafu {})?;
            return Ok(());
        }
    };

    let submissions = read_submissions(&source, &index, stdin, err)?;
    if submissions.is_empty() {
        warn!("No ranking line could be decoded");
        writeln!(out, "No valid submissions found.").context(WritingOutputSnafu {})?;
        return Ok(());
    }

    let agg = aggregate(&submissions);
    let report = render_report(&submissions, &agg).context(RenderingCsvSnafu {})?;
    write!(out, "{}", report).context(WritingOutputSnafu {})?;
    Ok(())
}
