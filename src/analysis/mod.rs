//! Audio analysis modules
//!
//! `features` scans the waveform once; `bpm`, `key` and `scoring` turn the
//! raw features into the published estimates. The trait abstraction allows
//! swapping backends without changing the API or pipeline code.

pub mod bpm;
pub mod features;
pub mod heuristic;
pub mod key;
pub mod scoring;
pub mod traits;

pub use features::RawFeatures;
pub use heuristic::{analyze, HeuristicAnalyzer};
pub use traits::AudioAnalyzer;
