//! Upload-facing API: validation, envelopes and request dispatch

pub mod envelope;
pub mod handler;
pub mod upload;

pub use envelope::{ErrorEnvelope, HealthStatus, SuccessEnvelope};
pub use handler::{AnalysisService, Method, Request, Response, ANALYZE_PATH, HEALTH_PATH};
pub use upload::{Upload, UploadLimits};
