//! Tempo estimation
//!
//! A linear blend of zero-crossing rate and peak rate, clamped to a plausible
//! dance-music range. No onset detection or autocorrelation is involved.

use crate::analysis::features::RawFeatures;

/// Slowest tempo the estimator reports
pub const MIN_BPM: f64 = 60.0;
/// Fastest tempo the estimator reports
pub const MAX_BPM: f64 = 180.0;

const ZERO_CROSSING_WEIGHT: f64 = 500.0;
const PEAK_WEIGHT: f64 = 300.0;

/// Estimate tempo in beats per minute
pub fn estimate_bpm(features: &RawFeatures) -> u32 {
    let raw = MIN_BPM
        + features.zero_crossing_rate * ZERO_CROSSING_WEIGHT
        + features.peak_rate * PEAK_WEIGHT;
    raw.clamp(MIN_BPM, MAX_BPM).round() as u32
}
