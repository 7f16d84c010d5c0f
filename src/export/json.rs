//! JSON batch report
//!
//! One entry per input file, carrying the exact envelope the API would have
//! returned for it together with the status code.

use crate::api::envelope::iso_timestamp;
use crate::error::{Result, TuneprobeError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Report schema version
const SCHEMA_VERSION: &str = "1.0";

/// Top-level report structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for forward compatibility
    pub version: String,
    /// tuneprobe version that generated this file
    pub generator_version: String,
    /// Timestamp of the run
    pub generated_at: String,
    /// Number of entries
    pub file_count: usize,
    pub results: Vec<ReportEntry>,
}

/// Outcome for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Source path as scanned
    pub path: String,
    /// Status the API would have answered with
    pub status: u16,
    /// Success or error envelope
    pub body: serde_json::Value,
}

impl Report {
    pub fn new(results: Vec<ReportEntry>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: iso_timestamp(chrono::Utc::now()),
            file_count: results.len(),
            results,
        }
    }

    /// Entries that did not produce a 2xx response
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.results.iter().filter(|e| !(200..300).contains(&e.status))
    }
}

/// Serialize the report to a string
pub fn render_report(report: &Report, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(text)
}

/// Write the report to a JSON file
///
/// Uses atomic write pattern: writes to a temp file first, then renames.
/// This prevents data corruption if the write is interrupted.
pub fn write_report(report: &Report, output_path: &Path, pretty: bool) -> Result<()> {
    // Write to temp file in same directory (ensures same filesystem for atomic rename)
    let temp_path = output_path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| TuneprobeError::output_error(output_path, e))?;
    let mut writer = BufWriter::new(file);

    let serialized = if pretty {
        serde_json::to_writer_pretty(&mut writer, report)
    } else {
        serde_json::to_writer(&mut writer, report)
    };

    // The final flush can fail too; publish nothing unless every byte landed
    serialized
        .map_err(std::io::Error::from)
        .and_then(|()| writer.flush())
        .map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            TuneprobeError::Output {
                path: output_path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
    drop(writer);

    // Atomic rename: either succeeds completely or fails without modifying target
    std::fs::rename(&temp_path, output_path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        TuneprobeError::Output {
            path: output_path.to_path_buf(),
            reason: format!("Failed to finalize file: {}", e),
        }
    })?;

    info!(
        "Wrote {} results to {}",
        report.file_count,
        output_path.display()
    );

    Ok(())
}

/// Read a previously written report
pub fn read_report(path: &Path) -> Result<Report> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TuneprobeError::FileNotFound(path.to_path_buf()),
        _ => TuneprobeError::Io(e),
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_report() -> Report {
        Report::new(vec![
            ReportEntry {
                path: "a.wav".to_string(),
                status: 200,
                body: serde_json::json!({ "success": true }),
            },
            ReportEntry {
                path: "b.mp3".to_string(),
                status: 400,
                body: serde_json::json!({ "error": "Upload error", "message": "Could not decode audio data" }),
            },
        ])
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        write_report(&sample_report(), &path, true).unwrap();

        assert!(!dir.path().join("report.json.tmp").exists());
        let report = read_report(&path).unwrap();
        assert_eq!(report.file_count, 2);
        assert_eq!(report.version, "1.0");
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_written_file_matches_rendered_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = Report::new(
            (0..500)
                .map(|i| ReportEntry {
                    path: format!("track_{:03}.wav", i),
                    status: 200,
                    body: serde_json::json!({ "success": true, "fileSize": i }),
                })
                .collect(),
        );

        write_report(&report, &path, false).unwrap();
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, render_report(&report, false).unwrap());
        assert_eq!(read_report(&path).unwrap().file_count, 500);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = write_report(&sample_report(), &path, false).unwrap_err();
        assert!(matches!(err, TuneprobeError::Output { .. }));
    }

    #[test]
    fn test_render_compact() {
        let text = render_report(&sample_report(), false).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.contains("\"file_count\":2"));
    }
}
