//! Request dispatch
//!
//! Routes transport-neutral requests to the health check or the analysis
//! handler and turns every outcome into a status code plus JSON envelope.
//! Binding this to a socket is left to whatever server embeds the crate.

use crate::analysis::{AudioAnalyzer, HeuristicAnalyzer};
use crate::api::envelope::{ErrorEnvelope, HealthStatus, SuccessEnvelope};
use crate::api::upload::{self, Upload, UploadLimits};
use crate::audio;
use crate::error::{Result, TuneprobeError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub const HEALTH_PATH: &str = "/api/health";
pub const ANALYZE_PATH: &str = "/api/analyze";

/// CORS headers attached to every response
const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Options,
    Other(String),
}

impl Method {
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "OPTIONS" => Method::Options,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Options => "OPTIONS",
            Method::Other(m) => m,
        }
    }
}

/// An incoming request with its (optional) uploaded file
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub upload: Option<Upload>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            upload: None,
        }
    }

    pub fn analyze(upload: Option<Upload>) -> Self {
        Self {
            method: Method::Post,
            path: ANALYZE_PATH.to_string(),
            upload,
        }
    }
}

/// Status, headers and JSON body to hand back to the transport
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Response {
    fn empty(status: u16) -> Self {
        Self {
            status,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        }
    }

    fn with_body(status: u16, body: serde_json::Value) -> Self {
        let mut response = Self::empty(status);
        response
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        response.body = Some(body);
        response
    }

    fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self::with_body(status, value),
            Err(e) => Self::from_error(&TuneprobeError::Json(e)),
        }
    }

    fn from_error(err: &TuneprobeError) -> Self {
        match serde_json::to_value(ErrorEnvelope::from(err)) {
            Ok(value) => Self::with_body(err.status_code(), value),
            Err(_) => Self::empty(err.status_code()),
        }
    }

    /// Look up a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Upload analysis service: validation, decoding and scoring behind one call
pub struct AnalysisService {
    analyzer: Arc<dyn AudioAnalyzer>,
    limits: UploadLimits,
}

impl AnalysisService {
    pub fn new(analyzer: Arc<dyn AudioAnalyzer>, limits: UploadLimits) -> Self {
        Self { analyzer, limits }
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// Dispatch a request by path and method
    pub fn handle(&self, request: Request) -> Response {
        match (request.path.as_str(), &request.method) {
            (HEALTH_PATH, Method::Get) => Response::json(200, &HealthStatus::ok()),
            (ANALYZE_PATH, Method::Options) => Response::empty(200),
            (ANALYZE_PATH, Method::Post) => self.handle_analyze(request.upload),
            (ANALYZE_PATH, method) => Response::from_error(&TuneprobeError::MethodNotAllowed {
                method: method.as_str().to_string(),
                path: request.path.clone(),
            }),
            _ => Response::from_error(&TuneprobeError::NotFound {
                path: request.path.clone(),
            }),
        }
    }

    fn handle_analyze(&self, upload: Option<Upload>) -> Response {
        let result = upload
            .ok_or(TuneprobeError::MissingUpload)
            .and_then(|upload| self.analyze_upload(upload));

        match result {
            Ok(envelope) => Response::json(200, &envelope),
            Err(e) if e.is_client_error() => {
                warn!("Rejected upload: {}", e);
                Response::from_error(&e)
            }
            Err(e) => {
                error!("Error processing audio: {}", e);
                Response::from_error(&e)
            }
        }
    }

    /// Validate, decode and analyze one upload
    pub fn analyze_upload(&self, upload: Upload) -> Result<SuccessEnvelope> {
        upload::validate(&upload, &self.limits)?;

        let file_size = upload.size();
        info!("Processing audio file: {} ({} bytes)", upload.file_name, file_size);

        let extension = upload.extension().map(str::to_string);
        let buffer = audio::decode_bytes(upload.bytes, &upload.file_name, extension.as_deref())?;
        let analysis = self.analyzer.analyze(&buffer)?;

        Ok(SuccessEnvelope::new(upload.file_name, file_size, analysis))
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicAnalyzer::new()), UploadLimits::default())
    }
}
