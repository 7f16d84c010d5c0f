//! JSON response envelopes
//!
//! Field names are camelCase on the wire to match existing API clients.

use crate::error::TuneprobeError;
use crate::types::AnalysisResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// ISO-8601 UTC timestamp with millisecond precision (e.g. "2024-05-01T12:00:00.000Z")
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Successful analysis response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope {
    pub success: bool,
    pub file_name: String,
    pub file_size: u64,
    pub analysis: AnalysisResult,
    pub timestamp: String,
}

impl SuccessEnvelope {
    pub fn new(file_name: impl Into<String>, file_size: u64, analysis: AnalysisResult) -> Self {
        Self {
            success: true,
            file_name: file_name.into(),
            file_size,
            analysis,
            timestamp: iso_timestamp(Utc::now()),
        }
    }
}

/// Failure response: a short label plus a caller-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl From<&TuneprobeError> for ErrorEnvelope {
    fn from(err: &TuneprobeError) -> Self {
        Self {
            error: err.error_label().to_string(),
            message: err.public_message(),
        }
    }
}

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Music Analysis API is running".to_string(),
            timestamp: iso_timestamp(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:30:05.000Z");
    }

    #[test]
    fn test_error_envelope_from_error() {
        let envelope = ErrorEnvelope::from(&TuneprobeError::MissingUpload);
        assert_eq!(envelope.error, "No audio file provided");
        assert_eq!(
            envelope.message,
            "Please upload an audio file using the \"audio\" field"
        );
    }

    #[test]
    fn test_success_envelope_field_names() {
        let analysis = crate::analysis::analyze(&[0.0; 10]).unwrap();
        let json = serde_json::to_value(SuccessEnvelope::new("a.wav", 42, analysis)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["fileName"], "a.wav");
        assert_eq!(json["fileSize"], 42);
        assert!(json["analysis"]["mood"].is_object());
        assert!(DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_health_status() {
        let json = serde_json::to_value(HealthStatus::ok()).unwrap();
        assert_eq!(json["status"], "OK");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
