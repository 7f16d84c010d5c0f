//! Analysis trait abstractions
//!
//! The API layer and the batch pipeline hold analyzers behind this trait so
//! the scoring backend can be swapped without touching request handling.
//! Current implementation is the waveform heuristic in `heuristic.rs`.

use crate::error::Result;
use crate::types::{AnalysisResult, AudioBuffer};

/// Whole-buffer analysis backend
pub trait AudioAnalyzer: Send + Sync {
    /// Estimate tempo, key, danceability and mood from decoded samples
    fn analyze(&self, buffer: &AudioBuffer) -> Result<AnalysisResult>;

    /// Get the name of this analyzer (for logging)
    fn name(&self) -> &'static str;
}
