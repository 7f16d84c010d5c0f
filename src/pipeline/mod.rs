//! Batch processing pipeline

pub mod orchestrator;

pub use orchestrator::{run, run_with_analyzer, PipelineResult};
