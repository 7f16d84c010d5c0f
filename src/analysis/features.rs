//! Single-pass waveform statistics
//!
//! Everything the scorers need is accumulated in one linear scan: absolute
//! sum, sum of squares, zero crossings, rising samples above the peak
//! threshold, and the running max/min of absolute amplitude.

use crate::error::{Result, TuneprobeError};

/// Amplitude a sample must exceed to count toward the peak tally
pub const PEAK_THRESHOLD: f64 = 0.1;

/// Waveform statistics derived once per buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFeatures {
    /// Number of samples scanned
    pub sample_count: usize,
    /// Mean absolute amplitude
    pub average: f64,
    /// Root-mean-square amplitude
    pub rms: f64,
    /// `rms * rms`
    pub energy: f64,
    /// Adjacent pairs whose non-negativity differs
    pub zero_crossings: u64,
    /// Samples above the threshold that rise in magnitude over their predecessor
    pub peak_count: u64,
    pub max_abs: f64,
    pub min_abs: f64,
    /// `max_abs - min_abs`
    pub dynamic_range: f64,
    pub zero_crossing_rate: f64,
    pub peak_rate: f64,
}

/// Scan `samples` once and derive the raw features
///
/// Rejects an empty buffer and any non-finite sample instead of letting NaN
/// leak into the scores.
pub fn extract(samples: &[f32]) -> Result<RawFeatures> {
    if samples.is_empty() {
        return Err(TuneprobeError::EmptyBuffer);
    }

    let mut sum = 0.0f64;
    let mut sum_squares = 0.0f64;
    let mut zero_crossings = 0u64;
    let mut peak_count = 0u64;
    let mut max_abs = f64::NEG_INFINITY;
    let mut min_abs = f64::INFINITY;

    let mut prev: Option<f64> = None;
    for (index, &raw) in samples.iter().enumerate() {
        if !raw.is_finite() {
            return Err(TuneprobeError::DegenerateBuffer { index });
        }
        let sample = raw as f64;
        let magnitude = sample.abs();

        sum += magnitude;
        sum_squares += sample * sample;
        max_abs = max_abs.max(magnitude);
        min_abs = min_abs.min(magnitude);

        if let Some(prev) = prev {
            if (sample >= 0.0) != (prev >= 0.0) {
                zero_crossings += 1;
            }
            if magnitude > PEAK_THRESHOLD && magnitude > prev.abs() {
                peak_count += 1;
            }
        }
        prev = Some(sample);
    }

    let n = samples.len() as f64;
    let rms = (sum_squares / n).sqrt();
    let features = RawFeatures {
        sample_count: samples.len(),
        average: sum / n,
        rms,
        energy: rms * rms,
        zero_crossings,
        peak_count,
        max_abs,
        min_abs,
        dynamic_range: max_abs - min_abs,
        zero_crossing_rate: zero_crossings as f64 / n,
        peak_rate: peak_count as f64 / n,
    };

    for (name, value) in [
        ("average", features.average),
        ("rms", features.rms),
        ("energy", features.energy),
        ("dynamic range", features.dynamic_range),
    ] {
        if !value.is_finite() {
            return Err(TuneprobeError::Computation {
                reason: format!("{} is not finite ({})", name, value),
            });
        }
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_alternating_scenario() {
        let f = extract(&[0.0, 0.5, -0.5, 0.5, -0.5]).unwrap();
        assert_eq!(f.sample_count, 5);
        assert!(approx(f.average, 0.4));
        assert!(approx(f.rms, 0.2f64.sqrt()));
        assert!(approx(f.energy, 0.2));
        // Non-negativity runs T, T, F, T, F: changes at 1->2, 2->3, 3->4
        assert_eq!(f.zero_crossings, 3);
        // Only index 1 rises above its predecessor's magnitude
        assert_eq!(f.peak_count, 1);
        assert!(approx(f.max_abs, 0.5));
        assert!(approx(f.min_abs, 0.0));
        assert!(approx(f.dynamic_range, 0.5));
        assert!(approx(f.zero_crossing_rate, 0.6));
        assert!(approx(f.peak_rate, 0.2));
    }

    #[test]
    fn test_single_sample_has_no_transitions() {
        let f = extract(&[-0.9]).unwrap();
        assert_eq!(f.zero_crossings, 0);
        assert_eq!(f.peak_count, 0);
        assert!(approx(f.dynamic_range, 0.0));
        assert!(approx(f.average, 0.9f32 as f64));
    }

    #[test]
    fn test_silence() {
        let f = extract(&[0.0; 1000]).unwrap();
        assert_eq!(f.zero_crossings, 0);
        assert_eq!(f.peak_count, 0);
        assert_eq!(f.energy, 0.0);
        assert_eq!(f.dynamic_range, 0.0);
    }

    #[test]
    fn test_negative_zero_counts_as_non_negative() {
        let f = extract(&[-0.0, 0.0, -0.0]).unwrap();
        assert_eq!(f.zero_crossings, 0);
    }

    #[test]
    fn test_peak_counts_every_rising_sample() {
        // Monotonic ramp above the threshold fires on each step, not only at the top
        let f = extract(&[0.2, 0.3, 0.4, 0.5]).unwrap();
        assert_eq!(f.peak_count, 3);
    }

    #[test]
    fn test_peak_threshold_is_strict() {
        let f = extract(&[0.0, 0.1]).unwrap();
        assert_eq!(f.peak_count, 0);
    }

    #[test]
    fn test_empty_buffer_rejected() {
        assert!(matches!(extract(&[]), Err(TuneprobeError::EmptyBuffer)));
    }

    #[test]
    fn test_non_finite_sample_rejected() {
        let err = extract(&[0.1, f32::NAN, 0.2]).unwrap_err();
        assert!(matches!(err, TuneprobeError::DegenerateBuffer { index: 1 }));

        let err = extract(&[f32::INFINITY]).unwrap_err();
        assert!(matches!(err, TuneprobeError::DegenerateBuffer { index: 0 }));
    }
}
