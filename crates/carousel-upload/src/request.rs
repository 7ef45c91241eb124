use std::collections::BTreeMap;

use carousel_core::CarouselError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::CarouselConfig;

/// What the user handed to the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum UploadSource {
    File { name: String, mime: String },
    Url { url: String },
}

/// A fully described upload, ready for the host's transport.
///
/// The block never performs I/O itself; the host sends this and reports back
/// through [`crate::resolve_upload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub endpoint: String,
    /// Body field carrying the file or link.
    pub field: String,
    pub source: UploadSource,
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub headers: BTreeMap<String, String>,
}

impl UploadRequest {
    pub fn for_source(config: &CarouselConfig, source: UploadSource) -> Result<Self, CarouselError> {
        let (endpoint, field) = match &source {
            UploadSource::File { name, mime } => {
                if !config.accepts(mime) {
                    return Err(CarouselError::UploadFailed(format!(
                        "file '{name}' has type '{mime}', accepted types are '{}'",
                        config.types
                    )));
                }
                (config.endpoints.by_file.as_deref(), config.field.as_str())
            }
            UploadSource::Url { url } => {
                if url.trim().is_empty() {
                    return Err(CarouselError::UploadFailed("url is empty".to_string()));
                }
                (config.endpoints.by_url.as_deref(), "url")
            }
        };

        let endpoint = endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                let which = match &source {
                    UploadSource::File { .. } => "byFile",
                    UploadSource::Url { .. } => "byUrl",
                };
                CarouselError::UploadFailed(format!("no '{which}' endpoint configured"))
            })?
            .to_string();

        Ok(Self {
            endpoint,
            field: field.to_string(),
            source,
            data: config.additional_request_data.clone(),
            headers: config.additional_request_headers.clone(),
        })
    }
}
