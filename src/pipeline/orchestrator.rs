//! Pipeline orchestration
//!
//! Coordinates file discovery, parallel analysis through the upload service,
//! and report export. Each file travels the same path as an HTTP upload, so
//! the report holds exactly the envelopes the API would have produced.

use crate::api::{AnalysisService, ErrorEnvelope, Request};
use crate::analysis::{AudioAnalyzer, HeuristicAnalyzer};
use crate::config::Settings;
use crate::discovery::{self, DiscoveredFile};
use crate::error::{Result, TuneprobeError};
use crate::export::{self, Report, ReportEntry};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline result summary
#[derive(Debug)]
pub struct PipelineResult {
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
    /// `None` in dry-run mode
    pub report: Option<Report>,
}

/// Run the full analysis pipeline with the heuristic analyzer
pub fn run(settings: &Settings) -> Result<PipelineResult> {
    run_with_analyzer(settings, Arc::new(HeuristicAnalyzer::new()))
}

/// Run the pipeline with a caller-supplied analyzer
pub fn run_with_analyzer(
    settings: &Settings,
    analyzer: Arc<dyn AudioAnalyzer>,
) -> Result<PipelineResult> {
    let pipeline_start = Instant::now();

    configure_thread_pool(settings.analysis_threads)?;

    // Phase 1: Discovery
    info!("Scanning for audio files...");
    let files = discovery::scan(&settings.input, settings.recursive)?;

    if settings.dry_run {
        run_dry_run(&files, settings);
        return Ok(PipelineResult {
            total_files: files.len(),
            successful: 0,
            failed: 0,
            report: None,
        });
    }

    // Phase 2: Analysis
    info!("Analyzing {} files with {}", files.len(), analyzer.name());
    let service = AnalysisService::new(analyzer, settings.limits.clone());
    let analysis_start = Instant::now();
    let entries = analyze_files(&files, &service, settings.show_progress);
    info!(
        "Analysis completed in {:.2}s",
        analysis_start.elapsed().as_secs_f64()
    );

    // Phase 3: Export
    let report = Report::new(entries);
    export_report(&report, settings)?;

    info!(
        "Total pipeline time: {:.2}s",
        pipeline_start.elapsed().as_secs_f64()
    );

    let failed = report.failures().count();
    Ok(PipelineResult {
        total_files: files.len(),
        successful: files.len() - failed,
        failed,
        report: Some(report),
    })
}

/// Dry run mode - list files that would be analyzed without processing
fn run_dry_run(files: &[DiscoveredFile], settings: &Settings) {
    println!();
    println!("=== DRY RUN MODE ===");
    println!();

    for file in files {
        let marker = if file.exceeds(&settings.limits) {
            " (over size limit, would be rejected)"
        } else {
            ""
        };
        println!(
            "  {} [{}, {} bytes]{}",
            file.path.display(),
            file.mime_type(),
            file.size_bytes,
            marker
        );
    }

    println!();
    println!("Would analyze {} files", files.len());
    match &settings.output {
        Some(path) => println!("Would write report to {}", path.display()),
        None => println!("Would print report to stdout"),
    }
    println!();
}

/// Configure the Rayon thread pool
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        Ok(()) => {
            debug!("Configured thread pool with {} threads", num_threads);
        }
        Err(e) => {
            // If the pool is already initialized (e.g., in tests), that's OK
            if e.to_string().contains("already been initialized") {
                debug!("Thread pool already initialized, using existing pool");
            } else {
                return Err(TuneprobeError::Config(format!(
                    "Failed to configure thread pool: {}",
                    e
                )));
            }
        }
    }
    Ok(())
}

/// Analyze files in parallel, preserving input order in the returned entries
fn analyze_files(
    files: &[DiscoveredFile],
    service: &AnalysisService,
    show_progress: bool,
) -> Vec<ReportEntry> {
    let progress_bar = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let entries: Vec<ReportEntry> = files
        .par_iter()
        .map(|file| {
            let entry = analyze_single_file(file, service);
            if let Some(ref pb) = progress_bar {
                pb.inc(1);
                pb.set_message(file.file_name());
            }
            entry
        })
        .collect();

    if let Some(pb) = progress_bar {
        pb.finish_with_message("Analysis complete");
    }

    entries
}

/// Push one file through the upload service
fn analyze_single_file(file: &DiscoveredFile, service: &AnalysisService) -> ReportEntry {
    debug!("Analyzing: {}", file.path.display());
    let path = file.path.to_string_lossy().to_string();

    match file.read_upload(service.limits()) {
        Ok(upload) => {
            let response = service.handle(Request::analyze(Some(upload)));
            if !response.is_success() {
                warn!("Failed {}: HTTP {}", file.path.display(), response.status);
            }
            ReportEntry {
                path,
                status: response.status,
                body: response.body.unwrap_or(serde_json::Value::Null),
            }
        }
        Err(e) => {
            warn!("Failed {}: {}", file.path.display(), e);
            ReportEntry {
                path,
                status: e.status_code(),
                body: serde_json::to_value(ErrorEnvelope::from(&e))
                    .unwrap_or(serde_json::Value::Null),
            }
        }
    }
}

/// Write the report to its file, or print it to stdout
fn export_report(report: &Report, settings: &Settings) -> Result<()> {
    match &settings.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| TuneprobeError::output_error(path, e))?;
                }
            }
            export::write_report(report, path, settings.pretty)
        }
        None => {
            println!("{}", export::render_report(report, settings.pretty)?);
            Ok(())
        }
    }
}
