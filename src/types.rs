//! Core data types for tuneprobe
//!
//! These types represent the domain model and flow from the decoder through
//! the analyzer into the response envelope.

use serde::{Serialize, Serializer};
use std::fmt;

// =============================================================================
// Musical primitives
// =============================================================================

/// The seven natural pitch classes used for key labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchClass {
    /// All pitch classes in label order
    pub const ALL: [PitchClass; 7] = [
        PitchClass::C,
        PitchClass::D,
        PitchClass::E,
        PitchClass::F,
        PitchClass::G,
        PitchClass::A,
        PitchClass::B,
    ];

    /// Convert from label index (0 = C, 1 = D, ..., 6 = B)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Note name (e.g., "C", "G")
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::D => "D",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::G => "G",
            PitchClass::A => "A",
            PitchClass::B => "B",
        }
    }
}

/// Major or Minor scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Convert from label index (0 = major, 1 = minor)
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Mode::Major),
            1 => Some(Mode::Minor),
            _ => None,
        }
    }

    /// Lowercase mode name as it appears in key labels
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// Estimated key, serialized as `"<pitch> <mode>"` (e.g., "D minor")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEstimate {
    pub pitch_class: PitchClass,
    pub mode: Mode,
}

impl fmt::Display for KeyEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pitch_class.name(), self.mode.name())
    }
}

impl Serialize for KeyEstimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Analysis results
// =============================================================================

/// Serializes an `f64` as a fixed 3-decimal string ("0.880")
///
/// The wire format carries scores as strings, not JSON numbers.
pub(crate) fn fixed3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_fixed3(*value))
}

/// Format a value with exactly three decimals, never printing "-0.000"
///
/// Exact halfway values round away from zero ("0.3125" -> "0.313"), where
/// `{:.3}` alone would round them to even. A binary double sits exactly
/// between two thousandths only when it is an odd multiple of 1/16.
pub fn format_fixed3(value: f64) -> String {
    let sixteenths = value * 16.0;
    let formatted = if sixteenths.fract() == 0.0 && sixteenths % 2.0 != 0.0 {
        format!("{:.3}", (value * 1000.0).round() / 1000.0)
    } else {
        format!("{:.3}", value)
    };
    if formatted == "-0.000" {
        "0.000".to_string()
    } else {
        formatted
    }
}

/// Four heuristic mood scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodScores {
    #[serde(serialize_with = "fixed3")]
    pub happy: f64,
    #[serde(serialize_with = "fixed3")]
    pub sad: f64,
    #[serde(serialize_with = "fixed3")]
    pub relaxed: f64,
    #[serde(serialize_with = "fixed3")]
    pub aggressive: f64,
}

/// Diagnostic echo of the working values behind the scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDiagnostics {
    #[serde(serialize_with = "fixed3")]
    pub intensity: f64,
    #[serde(serialize_with = "fixed3")]
    pub complexity: f64,
    #[serde(serialize_with = "fixed3")]
    pub dynamic_range: f64,
    pub zero_crossings: u64,
    pub peaks: u64,
}

/// Complete analysis of one sample buffer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Heuristic tempo, always in 60..=180
    pub bpm: u32,
    /// Heuristic key label
    pub key: KeyEstimate,
    #[serde(serialize_with = "fixed3")]
    pub danceability: f64,
    pub mood: MoodScores,
    pub features: FeatureDiagnostics,
}

// =============================================================================
// Audio buffer types
// =============================================================================

/// Decoded audio samples ready for analysis
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples, nominally in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz (informational; the analyzer is rate-agnostic)
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration: f64,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        // Guard against division by zero - use 0 duration for invalid sample rate
        let duration = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            samples,
            sample_rate,
            duration,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// =============================================================================
// Supported formats
// =============================================================================

/// Audio formats the decoder can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
    Ogg,
    Aac,
    Aiff,
}

impl AudioFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "wav" => Some(AudioFormat::Wav),
            "flac" => Some(AudioFormat::Flac),
            "ogg" | "oga" => Some(AudioFormat::Ogg),
            "m4a" | "aac" | "mp4" => Some(AudioFormat::Aac),
            "aiff" | "aif" => Some(AudioFormat::Aiff),
            _ => None,
        }
    }

    /// MIME type an uploading client would send for this format
    pub fn mime_type(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Aac => "audio/mp4",
            AudioFormat::Aiff => "audio/aiff",
        }
    }
}
