//! tuneprobe CLI entry point

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tuneprobe::config::{Cli, Settings};
use tuneprobe::pipeline;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    if let Err(e) = validate_inputs(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let settings = Settings::from_cli(&cli);

    match pipeline::run(&settings) {
        Ok(result) => {
            if result.report.is_some() {
                eprintln!();
                eprintln!(
                    "Summary: {} successful, {} failed (of {} total)",
                    result.successful, result.failed, result.total_files
                );
            }

            if result.failed > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    // Logs go to stderr so a report printed on stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn validate_inputs(cli: &Cli) -> Result<(), String> {
    if !cli.input.exists() {
        return Err(format!(
            "Input path does not exist: {}\n\n  Tip: Check the path is correct and accessible.\n  Examples:\n    tuneprobe -i ~/Music/set -o report.json\n    tuneprobe -i ./track.mp3",
            cli.input.display()
        ));
    }

    if cli.max_size_mb == 0 {
        return Err("--max-size-mb must be at least 1".to_string());
    }

    if let Some(output) = &cli.output {
        if output.is_dir() {
            return Err(format!(
                "Output must be a file path, not a directory: {}\n\n  Example: tuneprobe -i {} -o {}/report.json",
                output.display(),
                cli.input.display(),
                output.display()
            ));
        }
    }

    Ok(())
}
