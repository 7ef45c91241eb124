//! Sorted-key JSON for stable output.
//!
//! Saved entries serialize `url` and `caption` ahead of extra fields; the
//! canonical form deep-sorts every object so equal data always gives equal
//! bytes, whatever map ordering serde_json was built with.

use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize `value` as minified JSON with all object keys sorted.
pub fn to_canonical_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut v = serde_json::to_value(value)?;
    sort_keys(&mut v);
    serde_json::to_string(&v)
}

fn sort_keys(v: &mut Value) {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (k, mut child) in entries {
                sort_keys(&mut child);
                sorted.insert(k, child);
            }
            *map = sorted;
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        _ => {}
    }
}
