//! tuneprobe - heuristic music attribute estimation
//!
//! Estimates tempo, key, danceability and mood from decoded audio samples
//! using simple deterministic waveform statistics, and wraps the estimate in
//! the JSON envelopes served by the upload API.
//!
//! # Architecture
//!
//! - `analysis`: single-pass feature scan plus closed-form scoring (the core)
//! - `audio`: symphonia decoding of uploads and files to mono samples
//! - `api`: upload validation, response envelopes and request dispatch
//! - `discovery`: file scanning for batch runs
//! - `pipeline`: parallel batch orchestration
//! - `export`: JSON report output
//! - `config`: CLI argument parsing and runtime settings
//!
//! # Example
//!
//! ```
//! let result = tuneprobe::analysis::analyze(&[0.0, 0.5, -0.5, 0.5, -0.5]).unwrap();
//! assert_eq!(result.bpm, 180);
//! assert_eq!(result.key.to_string(), "D minor");
//! ```

pub mod analysis;
pub mod api;
pub mod audio;
pub mod config;
pub mod discovery;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod types;

// Re-export key types at crate root
pub use analysis::analyze;
pub use error::{Result, TuneprobeError};
pub use types::{AnalysisResult, AudioBuffer, FeatureDiagnostics, KeyEstimate, MoodScores};
