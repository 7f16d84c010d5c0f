//! Danceability and mood scoring
//!
//! Closed-form blends of two normalized working values: intensity (from
//! energy) and complexity (from zero-crossing rate). Every score is clamped
//! to [0, 1].

use crate::analysis::features::RawFeatures;
use crate::types::{FeatureDiagnostics, MoodScores};

/// Normalized working values shared by all scorers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingValues {
    pub intensity: f64,
    pub complexity: f64,
    pub smoothness: f64,
    pub peak_rate: f64,
}

impl WorkingValues {
    pub fn from_features(features: &RawFeatures) -> Self {
        let intensity = unit_clamp(features.energy * 5.0);
        let complexity = unit_clamp(features.zero_crossing_rate * 10.0);
        Self {
            intensity,
            complexity,
            smoothness: 1.0 - complexity,
            peak_rate: features.peak_rate,
        }
    }
}

fn unit_clamp(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

pub fn danceability(w: &WorkingValues) -> f64 {
    unit_clamp(w.intensity * 0.6 + w.complexity * 0.4)
}

pub fn mood(w: &WorkingValues) -> MoodScores {
    MoodScores {
        happy: unit_clamp(w.intensity * 0.7 + w.complexity * 0.3),
        sad: unit_clamp((1.0 - w.intensity) * 0.8 + (1.0 - w.complexity) * 0.2),
        relaxed: unit_clamp((1.0 - w.intensity) * 0.6 + w.smoothness * 0.4),
        aggressive: unit_clamp(
            w.intensity * 0.5 + w.complexity * 0.3 + (w.peak_rate * 2.0) * 0.2,
        ),
    }
}

pub fn diagnostics(w: &WorkingValues, features: &RawFeatures) -> FeatureDiagnostics {
    FeatureDiagnostics {
        intensity: w.intensity,
        complexity: w.complexity,
        dynamic_range: features.dynamic_range,
        zero_crossings: features.zero_crossings,
        peaks: features.peak_count,
    }
}
