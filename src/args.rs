use clap::Parser;

/// Decodes student image rankings into contributor leaderboards.
///
/// The manifest is read from ./config.json, or from the path in RANKINGS_CONFIG.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (ranking line, file path or empty) Either a single ranking line such as "M45_2026,525,002,694",
    /// or a file containing one ranking line per line. If not provided, the ranking lines are read from
    /// the standard input.
    #[clap(value_parser)]
    pub input: Option<String>,
}
