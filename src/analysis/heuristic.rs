//! Heuristic analyzer
//!
//! Ties the feature scan and the closed-form scorers together. The whole
//! computation is a pure function of the sample slice.

use crate::analysis::features;
use crate::analysis::scoring::{self, WorkingValues};
use crate::analysis::traits::AudioAnalyzer;
use crate::analysis::{bpm, key};
use crate::error::Result;
use crate::types::{AnalysisResult, AudioBuffer};
use tracing::debug;

/// Analyze a mono sample buffer
///
/// Fails with [`TuneprobeError::EmptyBuffer`](crate::TuneprobeError::EmptyBuffer)
/// for an empty slice and with `DegenerateBuffer` if any sample is not finite.
pub fn analyze(samples: &[f32]) -> Result<AnalysisResult> {
    let raw = features::extract(samples)?;
    let working = WorkingValues::from_features(&raw);

    let result = AnalysisResult {
        bpm: bpm::estimate_bpm(&raw),
        key: key::estimate_key(&raw),
        danceability: scoring::danceability(&working),
        mood: scoring::mood(&working),
        features: scoring::diagnostics(&working, &raw),
    };

    debug!(
        "Analyzed {} samples: rms={:.4}, zcr={:.4}, peaks={}, bpm={}, key={}",
        raw.sample_count, raw.rms, raw.zero_crossing_rate, raw.peak_count, result.bpm, result.key
    );

    Ok(result)
}

/// Analyzer backed by the waveform heuristics in this module
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl AudioAnalyzer for HeuristicAnalyzer {
    fn analyze(&self, buffer: &AudioBuffer) -> Result<AnalysisResult> {
        debug!(
            "Running heuristic analysis ({} samples, {}Hz)",
            buffer.len(),
            buffer.sample_rate
        );
        analyze(&buffer.samples)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TuneprobeError;

    const KEY_LABELS: [&str; 14] = [
        "C major", "C minor", "D major", "D minor", "E major", "E minor", "F major", "F minor",
        "G major", "G minor", "A major", "A minor", "B major", "B minor",
    ];

    /// Deterministic pseudo-noise so property checks cover varied shapes
    fn lcg_samples(seed: u64, len: usize, scale: f32) -> Vec<f32> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
                (unit * 2.0 - 1.0) * scale
            })
            .collect()
    }

    #[test]
    fn test_alternating_scenario_output() {
        let result = analyze(&[0.0, 0.5, -0.5, 0.5, -0.5]).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["bpm"], 180);
        assert_eq!(json["key"], "D minor");
        assert_eq!(json["danceability"], "1.000");
        assert_eq!(json["mood"]["happy"], "1.000");
        assert_eq!(json["mood"]["sad"], "0.000");
        assert_eq!(json["mood"]["relaxed"], "0.000");
        assert_eq!(json["mood"]["aggressive"], "0.880");
        assert_eq!(json["features"]["intensity"], "1.000");
        assert_eq!(json["features"]["complexity"], "1.000");
        assert_eq!(json["features"]["dynamicRange"], "0.500");
        assert_eq!(json["features"]["zeroCrossings"], 3);
        assert_eq!(json["features"]["peaks"], 1);
    }

    #[test]
    fn test_silence_output() {
        let result = analyze(&[0.0; 1000]).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["bpm"], 60);
        assert_eq!(json["key"], "C major");
        assert_eq!(json["danceability"], "0.000");
        assert_eq!(json["mood"]["happy"], "0.000");
        assert_eq!(json["mood"]["sad"], "1.000");
        assert_eq!(json["mood"]["relaxed"], "1.000");
        assert_eq!(json["mood"]["aggressive"], "0.000");
        assert_eq!(result.features.intensity, 0.0);
        assert_eq!(result.features.complexity, 0.0);
    }

    #[test]
    fn test_single_sample() {
        let result = analyze(&[0.7]).unwrap();
        assert_eq!(result.features.zero_crossings, 0);
        assert_eq!(result.features.peaks, 0);
        assert_eq!(result.bpm, 60);
    }

    #[test]
    fn test_empty_buffer_is_an_error() {
        assert!(matches!(analyze(&[]), Err(TuneprobeError::EmptyBuffer)));
    }

    #[test]
    fn test_deterministic_output() {
        let samples = lcg_samples(7, 4096, 0.8);
        let first = serde_json::to_string(&analyze(&samples).unwrap()).unwrap();
        let second = serde_json::to_string(&analyze(&samples).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_ranges_hold_for_varied_buffers() {
        for (seed, len, scale) in [(1, 1, 1.0), (2, 17, 0.05), (3, 1000, 0.3), (4, 8192, 1.0), (5, 333, 4.0)] {
            let samples = lcg_samples(seed, len, scale);
            let r = analyze(&samples).unwrap();

            assert!((60..=180).contains(&r.bpm), "bpm {} out of range", r.bpm);
            assert!(KEY_LABELS.contains(&r.key.to_string().as_str()));
            for score in [
                r.danceability,
                r.mood.happy,
                r.mood.sad,
                r.mood.relaxed,
                r.mood.aggressive,
            ] {
                assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            }
        }
    }

    #[test]
    fn test_halfway_diagnostics_round_up_on_the_wire() {
        // One crossing in 32 samples: complexity is exactly 0.3125
        let mut samples = vec![0.05f32; 16];
        samples.extend([-0.05f32; 16]);
        let result = analyze(&samples).unwrap();
        assert_eq!(result.features.zero_crossings, 1);
        assert_eq!(result.features.complexity, 0.3125);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["features"]["complexity"], "0.313");

        let json = serde_json::to_value(analyze(&[0.0, 0.0625]).unwrap()).unwrap();
        assert_eq!(json["features"]["dynamicRange"], "0.063");
    }

    #[test]
    fn test_trait_delegates_to_function() {
        let buffer = AudioBuffer::new(vec![0.0, 0.5, -0.5, 0.5, -0.5], 44100);
        let analyzer = HeuristicAnalyzer::new();
        assert_eq!(analyzer.name(), "heuristic");
        assert_eq!(
            analyzer.analyze(&buffer).unwrap(),
            analyze(&buffer.samples).unwrap()
        );
    }
}
