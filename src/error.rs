//! Unified error types for tuneprobe
//!
//! Error strategy:
//! - Rejected input (upload checks, empty or degenerate audio): client error, 4xx
//! - Computation and system faults: internal error, 5xx, details only in logs
//!
//! Every error maps to a status code and a public envelope label so the API
//! layer never has to inspect error text.

use std::path::PathBuf;
use thiserror::Error;

/// Supported audio formats for helpful error messages
pub const SUPPORTED_FORMATS: &str = "MP3, WAV, FLAC, OGG, AAC/M4A, AIFF";

/// Top-level error type for tuneprobe operations
#[derive(Debug, Error)]
pub enum TuneprobeError {
    // =========================================================================
    // Input rejected before the analyzer runs
    // =========================================================================
    #[error("No audio file provided\n  Tip: Upload the file using the \"audio\" field")]
    MissingUpload,

    #[error("Unexpected upload field '{field}' (expected '{expected}')")]
    UnexpectedField { field: String, expected: String },

    #[error("Unsupported media type '{mime_type}': only audio/* uploads are accepted")]
    UnsupportedMediaType { mime_type: String },

    #[error("File too large ({size} bytes). Maximum upload size is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("No route for {path}")]
    NotFound { path: String },

    // =========================================================================
    // Decoding - the upload was accepted but is not usable audio
    // =========================================================================
    #[error("Failed to decode audio '{source_name}': {reason}\n  Supported formats: {SUPPORTED_FORMATS}")]
    Decode { source_name: String, reason: String },

    #[error("Unsupported audio format for '{path}': {format}\n  Supported formats: {SUPPORTED_FORMATS}")]
    UnsupportedFormat { path: PathBuf, format: String },

    #[error("File not found: '{0}'\n  Tip: Check the path exists and is accessible")]
    FileNotFound(PathBuf),

    // =========================================================================
    // Analyzer errors
    // =========================================================================
    #[error("Sample buffer is empty; at least one sample is required")]
    EmptyBuffer,

    #[error("Sample buffer is degenerate: non-finite sample at index {index}")]
    DegenerateBuffer { index: usize },

    #[error("Feature computation failed: {reason}")]
    Computation { reason: String },

    // =========================================================================
    // Fatal errors - abort the batch
    // =========================================================================
    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    Output { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tuneprobe operations
pub type Result<T> = std::result::Result<T, TuneprobeError>;

impl TuneprobeError {
    /// Returns true if the caller is at fault (maps to a 4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TuneprobeError::MissingUpload
                | TuneprobeError::UnexpectedField { .. }
                | TuneprobeError::UnsupportedMediaType { .. }
                | TuneprobeError::FileTooLarge { .. }
                | TuneprobeError::MethodNotAllowed { .. }
                | TuneprobeError::NotFound { .. }
                | TuneprobeError::Decode { .. }
                | TuneprobeError::UnsupportedFormat { .. }
                | TuneprobeError::FileNotFound(_)
                | TuneprobeError::EmptyBuffer
                | TuneprobeError::DegenerateBuffer { .. }
        )
    }

    /// HTTP status code used when this error reaches the response envelope
    pub fn status_code(&self) -> u16 {
        match self {
            TuneprobeError::MethodNotAllowed { .. } => 405,
            TuneprobeError::NotFound { .. } => 404,
            e if e.is_client_error() => 400,
            _ => 500,
        }
    }

    /// Short label for the envelope's `error` field
    pub fn error_label(&self) -> &'static str {
        match self {
            TuneprobeError::MissingUpload => "No audio file provided",
            TuneprobeError::FileTooLarge { .. } => "File too large",
            TuneprobeError::UnexpectedField { .. }
            | TuneprobeError::UnsupportedMediaType { .. }
            | TuneprobeError::Decode { .. }
            | TuneprobeError::UnsupportedFormat { .. }
            | TuneprobeError::FileNotFound(_) => "Upload error",
            TuneprobeError::EmptyBuffer | TuneprobeError::DegenerateBuffer { .. } => {
                "Invalid audio"
            }
            TuneprobeError::MethodNotAllowed { .. } => "Method not allowed",
            TuneprobeError::NotFound { .. } => "Not found",
            _ => "Internal server error",
        }
    }

    /// Caller-facing message for the envelope's `message` field
    ///
    /// Internal errors get a fixed message; their detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            TuneprobeError::MissingUpload => {
                "Please upload an audio file using the \"audio\" field".to_string()
            }
            TuneprobeError::FileTooLarge { limit, .. } => {
                const MIB: u64 = 1024 * 1024;
                if *limit >= MIB && limit % MIB == 0 {
                    format!("File size must be less than {}MB", limit / MIB)
                } else {
                    format!("File size must be less than {} bytes", limit)
                }
            }
            TuneprobeError::UnsupportedMediaType { .. } => {
                "Only audio files are allowed!".to_string()
            }
            TuneprobeError::UnexpectedField { .. } => "Unexpected field".to_string(),
            TuneprobeError::Decode { .. }
            | TuneprobeError::UnsupportedFormat { .. }
            | TuneprobeError::FileNotFound(_) => "Could not decode audio data".to_string(),
            TuneprobeError::EmptyBuffer | TuneprobeError::DegenerateBuffer { .. } => {
                "Decoded audio contains no usable samples".to_string()
            }
            TuneprobeError::MethodNotAllowed { .. } => {
                "Only POST requests are allowed".to_string()
            }
            TuneprobeError::NotFound { .. } => {
                "The requested resource was not found".to_string()
            }
            _ => "Audio analysis failed".to_string(),
        }
    }

    /// Create a decode error with context about the issue
    pub fn decode_error(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        TuneprobeError::Decode {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!(
                    "Directory does not exist: {}",
                    path.parent().map(|p| p.display().to_string()).unwrap_or_default()
                )
            }
            _ => err.to_string(),
        };
        TuneprobeError::Output { path, reason }
    }
}
