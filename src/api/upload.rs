//! Upload validation
//!
//! Checks run before any bytes reach the decoder: the form field must be
//! `audio`, the payload must fit under the size ceiling, and the declared MIME
//! type must be `audio/*`.

use crate::error::{Result, TuneprobeError};
use std::path::Path;
use tracing::debug;

/// Default upload ceiling (50 MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Form field that must carry the audio file
pub const AUDIO_FIELD: &str = "audio";

/// Accepted MIME prefix
pub const AUDIO_MIME_PREFIX: &str = "audio/";

/// A single uploaded file, as handed over by the transport
#[derive(Debug, Clone)]
pub struct Upload {
    /// Multipart field the file arrived in
    pub field_name: String,
    /// Client-supplied original file name
    pub file_name: String,
    /// Client-declared MIME type
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            field_name: AUDIO_FIELD.to_string(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size of the payload in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// File extension from the original name, used as a decoder hint
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.file_name).extension().and_then(|e| e.to_str())
    }
}

/// Limits enforced on every upload
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_bytes: u64,
    pub field_name: String,
    pub mime_prefix: String,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            field_name: AUDIO_FIELD.to_string(),
            mime_prefix: AUDIO_MIME_PREFIX.to_string(),
        }
    }
}

/// Validate an upload against the limits
pub fn validate(upload: &Upload, limits: &UploadLimits) -> Result<()> {
    if upload.field_name != limits.field_name {
        return Err(TuneprobeError::UnexpectedField {
            field: upload.field_name.clone(),
            expected: limits.field_name.clone(),
        });
    }

    if upload.size() > limits.max_bytes {
        return Err(TuneprobeError::FileTooLarge {
            size: upload.size(),
            limit: limits.max_bytes,
        });
    }

    if !upload.mime_type.starts_with(&limits.mime_prefix) {
        return Err(TuneprobeError::UnsupportedMediaType {
            mime_type: upload.mime_type.clone(),
        });
    }

    debug!(
        "Accepted upload {} ({} bytes, {})",
        upload.file_name,
        upload.size(),
        upload.mime_type
    );
    Ok(())
}
