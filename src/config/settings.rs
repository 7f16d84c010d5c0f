//! Runtime configuration settings

use crate::api::UploadLimits;
use std::path::PathBuf;

/// Runtime settings for the batch pipeline
#[derive(Debug, Clone)]
pub struct Settings {
    /// Input path (file or directory)
    pub input: PathBuf,
    /// Report file; `None` prints to stdout
    pub output: Option<PathBuf>,
    /// Number of analysis worker threads
    pub analysis_threads: usize,
    /// Scan recursively
    pub recursive: bool,
    /// Checks applied to every file before decoding
    pub limits: UploadLimits,
    /// Pretty-print the report
    pub pretty: bool,
    /// Show progress bars
    pub show_progress: bool,
    /// Dry run mode - show files without processing
    pub dry_run: bool,
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_cli(cli: &super::cli::Cli) -> Self {
        let default_threads = num_cpus::get().saturating_sub(1).max(1);

        Self {
            input: cli.input.clone(),
            output: cli.output.clone(),
            analysis_threads: cli.threads.unwrap_or(default_threads).max(1),
            recursive: cli.recursive,
            limits: UploadLimits {
                max_bytes: cli.max_size_mb.saturating_mul(1024 * 1024),
                ..UploadLimits::default()
            },
            pretty: cli.pretty,
            show_progress: !cli.quiet,
            dry_run: cli.dry_run,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output: None,
            analysis_threads: num_cpus::get().saturating_sub(1).max(1),
            recursive: true,
            limits: UploadLimits::default(),
            pretty: false,
            show_progress: true,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Cli;
    use clap::Parser;

    #[test]
    fn test_from_cli_converts_megabytes() {
        let cli = Cli::parse_from(["tuneprobe", "-i", "in", "--max-size-mb", "2", "-j", "0"]);
        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.limits.max_bytes, 2 * 1024 * 1024);
        assert_eq!(settings.limits.field_name, "audio");
        assert_eq!(settings.analysis_threads, 1);
        assert!(settings.recursive);
    }

    #[test]
    fn test_from_cli_top_level_only() {
        let cli = Cli::parse_from(["tuneprobe", "-i", "in", "--no-recursive"]);
        assert!(!Settings::from_cli(&cli).recursive);
    }
}
