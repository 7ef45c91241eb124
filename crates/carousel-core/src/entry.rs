use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys owned by [`ImageEntry`] itself; never carried in `extra`.
pub const RESERVED_KEYS: &[&str] = &["url", "caption"];

/// One carousel item in persisted form.
///
/// Wire shape: `{ "url": string, "caption"?: string, ...extra }`.
/// Unknown keys land in `extra` and are written back verbatim on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Empty while an upload is pending.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub caption: String,
    /// Transport-defined fields (dimensions, storage key, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle of an entry as seen through its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Pending,
    Ready,
    Removed,
}

impl EntryState {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntryState::Pending => "pending",
            EntryState::Ready => "ready",
            EntryState::Removed => "removed",
        }
    }
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl ImageEntry {
    /// Build a ready entry from an upload result.
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
            extra: Map::new(),
        }
    }

    /// Decode one persisted record, substituting defaults for anything malformed.
    ///
    /// Non-object records become an empty (pending) entry.
    pub fn from_record(record: Value) -> Self {
        match record {
            Value::Object(map) => match serde_json::from_value(Value::Object(map)) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "record could not be decoded; using empty entry");
                    Self::default()
                }
            },
            other => {
                tracing::debug!(kind = json_kind(&other), "non-object record; using empty entry");
                Self::default()
            }
        }
    }

    pub fn state(&self) -> EntryState {
        if self.url.is_empty() {
            EntryState::Pending
        } else {
            EntryState::Ready
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.url.is_empty()
    }

    /// Replace the extra fields, dropping keys that would shadow `url`/`caption`.
    pub fn set_extra(&mut self, mut extra: Map<String, Value>) {
        for k in RESERVED_KEYS {
            extra.remove(*k);
        }
        self.extra = extra;
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
