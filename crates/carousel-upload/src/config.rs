use std::collections::BTreeMap;

use carousel_messages::{MessageKey, Translator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    /// Receives multipart uploads of a selected file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_file: Option<String>,
    /// Receives `{ "url": ... }` for a pasted link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_url: Option<String>,
}

/// Tool configuration supplied by the host editor.
///
/// Every field is optional on the wire; missing fields take the defaults
/// below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    pub endpoints: Endpoints,
    /// Merged into every upload request body.
    pub additional_request_data: Map<String, Value>,
    pub additional_request_headers: BTreeMap<String, String>,
    /// Multipart field name for the file.
    pub field: String,
    /// Accepted MIME patterns, comma separated (`image/*`, `image/png`, ...).
    pub types: String,
    pub button_content: String,
    /// Overrides the translated `Caption` placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_placeholder: Option<String>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            additional_request_data: Map::new(),
            additional_request_headers: BTreeMap::new(),
            field: "image".to_string(),
            types: "image/*".to_string(),
            button_content: String::new(),
            caption_placeholder: None,
        }
    }
}

impl CarouselConfig {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn caption_placeholder(&self, translator: &dyn Translator) -> String {
        self.caption_placeholder
            .clone()
            .unwrap_or_else(|| translator.translate(MessageKey::Caption))
    }

    /// Whether a file of this MIME type may be uploaded.
    ///
    /// An empty `types` accepts everything.
    pub fn accepts(&self, mime: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        let mut patterns = self
            .types
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .peekable();

        if patterns.peek().is_none() {
            return true;
        }

        patterns.any(|p| mime_matches(&p, &mime))
    }
}

fn mime_matches(pattern: &str, mime: &str) -> bool {
    if pattern == "*" || pattern == "*/*" {
        return true;
    }
    match pattern.strip_suffix("/*") {
        Some(top) => mime
            .split_once('/')
            .is_some_and(|(t, sub)| t == top && !sub.is_empty()),
        None => pattern == mime,
    }
}
