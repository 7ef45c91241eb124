//! Reading and writing the carousel's persisted data.
//!
//! The host stores the block as an ordered array of records. Loading is
//! deliberately forgiving about individual records (missing or mistyped
//! fields fall back to defaults) but strict about the container, so a wrong
//! file is reported instead of silently producing an empty carousel.

use std::fmt;

use carousel_core::{CarouselModel, EntryState};
use serde_json::Value;

/// Key of the record array when the host wraps it in an object.
pub const ENVELOPE_KEY: &str = "items";

#[derive(Debug)]
pub enum DataJsonError {
    /// The input was not valid JSON.
    InvalidJson(serde_json::Error),
    /// Valid JSON, but neither a record array nor an `{ "items": [...] }` envelope.
    InvalidDataShape { found: &'static str },
}

impl fmt::Display for DataJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataJsonError::InvalidJson(e) => write!(f, "Invalid JSON: {e}"),
            DataJsonError::InvalidDataShape { found } => write!(
                f,
                "Invalid carousel data: expected an array of records or an object with an '{ENVELOPE_KEY}' array, found {found}."
            ),
        }
    }
}

impl std::error::Error for DataJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataJsonError::InvalidJson(e) => Some(e),
            DataJsonError::InvalidDataShape { .. } => None,
        }
    }
}

/// Parse saved carousel data into a model.
pub fn parse_data_json_str(s: &str) -> Result<CarouselModel, DataJsonError> {
    let v: Value = serde_json::from_str(s).map_err(DataJsonError::InvalidJson)?;
    parse_data_value(v)
}

/// Same as [`parse_data_json_str`] for an already-parsed value.
pub fn parse_data_value(v: Value) -> Result<CarouselModel, DataJsonError> {
    let records = match v {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove(ENVELOPE_KEY) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(DataJsonError::InvalidDataShape {
                    found: kind_of(&other),
                });
            }
            None => {
                return Err(DataJsonError::InvalidDataShape {
                    found: "an object without an 'items' key",
                });
            }
        },
        other => {
            return Err(DataJsonError::InvalidDataShape {
                found: kind_of(&other),
            });
        }
    };

    let model = CarouselModel::from_records(records);
    let pending = model
        .iter()
        .filter(|(_, e)| e.state() == EntryState::Pending)
        .count();
    if pending > 0 {
        tracing::debug!(pending, total = model.len(), "loaded records without url");
    }
    Ok(model)
}

/// The save payload: ready entries only, as a JSON array.
pub fn save_value(model: &CarouselModel) -> Result<Value, serde_json::Error> {
    serde_json::to_value(model.serialize())
}

/// Serialize the save payload as minified JSON.
pub fn to_minified_json(model: &CarouselModel) -> Result<String, serde_json::Error> {
    serde_json::to_string(&model.serialize())
}

/// Serialize the save payload as pretty JSON.
pub fn to_pretty_json(model: &CarouselModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&model.serialize())
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
