use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for the `tally` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "Export Toggl time entries as a per-task spreadsheet report"
)]
pub struct Cli {
    /// First day to report on, YYYY-MM-DD (defaults to now).
    ///
    /// A date after tomorrow also needs --until, since the default end
    /// would come before it.
    #[arg(long, value_name = "DATE")]
    pub since: Option<String>,

    /// Day after the last one to report on, YYYY-MM-DD (defaults to now + 1 day)
    #[arg(long, value_name = "DATE")]
    pub until: Option<String>,

    /// Output file (overrides `report.output_path`)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
