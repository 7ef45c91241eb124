use std::fmt;

use carousel_core::CarouselError;
use carousel_core::entry::RESERVED_KEYS;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body returned by an upload endpoint.
///
/// `{ "success": 1, "file": { "url": "...", ...extra } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Value>,
}

/// What a successful upload produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDescriptor {
    pub url: String,
    pub caption: Option<String>,
    pub extra: Map<String, Value>,
}

/// Failure reported by the transport itself (network, server error, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<String> for TransportError {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TransportError {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl UploadResponse {
    /// Accepts `true`, non-zero numbers and non-empty strings.
    pub fn is_success(&self) -> bool {
        match &self.success {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            _ => false,
        }
    }

    /// Extract the file descriptor, or fail with `UploadFailed`.
    pub fn into_descriptor(self) -> Result<FileDescriptor, CarouselError> {
        let incorrect = |resp: &UploadResponse| {
            let raw = serde_json::to_string(resp).unwrap_or_default();
            CarouselError::UploadFailed(format!("incorrect response: {raw}"))
        };

        if !self.is_success() {
            return Err(incorrect(&self));
        }

        let mut file = match &self.file {
            Some(Value::Object(map)) => map.clone(),
            _ => return Err(incorrect(&self)),
        };

        let url = match file.get("url") {
            Some(Value::String(u)) if !u.is_empty() => u.clone(),
            _ => return Err(incorrect(&self)),
        };
        let caption = match file.get("caption") {
            Some(Value::String(c)) => Some(c.clone()),
            _ => None,
        };
        for k in RESERVED_KEYS {
            file.remove(*k);
        }

        Ok(FileDescriptor {
            url,
            caption,
            extra: file,
        })
    }
}
