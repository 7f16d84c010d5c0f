//! Key estimation
//!
//! Maps energy and dynamic range onto one of 14 key labels. This is a fixed
//! deterministic lookup, not pitch-class detection: identical inputs must keep
//! producing identical labels.

use crate::analysis::features::RawFeatures;
use crate::types::{KeyEstimate, Mode, PitchClass};

const PITCH_CLASS_COUNT: f64 = 7.0;
const MODE_COUNT: f64 = 2.0;

/// Estimate the key label from raw features
pub fn estimate_key(features: &RawFeatures) -> KeyEstimate {
    let key_index = wrap_index(features.energy * PITCH_CLASS_COUNT, PITCH_CLASS_COUNT);
    let mode_index = wrap_index(features.dynamic_range * MODE_COUNT, MODE_COUNT);

    KeyEstimate {
        pitch_class: PitchClass::from_index(key_index).unwrap_or(PitchClass::C),
        mode: Mode::from_index(mode_index).unwrap_or(Mode::Major),
    }
}

/// `floor(value mod modulus)`, with `%` keeping the sign of `value`
fn wrap_index(value: f64, modulus: f64) -> usize {
    (value % modulus).floor().max(0.0) as usize
}
