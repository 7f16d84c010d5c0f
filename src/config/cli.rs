//! CLI argument parsing and configuration

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// tuneprobe - heuristic tempo, key and mood estimation
///
/// Feeds audio files through the same upload checks and analyzer as the
/// `/api/analyze` endpoint and collects the JSON envelopes into one report.
#[derive(Parser, Debug)]
#[command(name = "tuneprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Input path (file or directory)
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of worker threads (defaults to CPU count - 1)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Only scan the top level of the input directory
    #[arg(long = "no-recursive", action = ArgAction::SetFalse)]
    pub recursive: bool,

    /// Upload size ceiling in megabytes
    #[arg(long, value_name = "MB", default_value_t = 50)]
    pub max_size_mb: u64,

    /// Pretty-print the JSON report
    #[arg(long, default_value = "false")]
    pub pretty: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress bars and warnings)
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Dry run - list files that would be analyzed without processing
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl Cli {
    /// Get the log filter directive based on verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
