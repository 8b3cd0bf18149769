//! Request body normalization.
//!
//! Callers send either `{"userData": {...}}` or the profile object directly,
//! sometimes as a JSON document encoded inside a JSON string. Nothing here
//! fails: anything that cannot be parsed is passed on as-is and rejected by
//! validation instead.

use serde_json::Value;

/// Field that wraps the profile in the enveloped calling convention.
const USER_DATA_FIELD: &str = "userData";

/// Parse a raw request body into a JSON value.
///
/// Non-JSON text is kept as a JSON string. A JSON string is parsed once more,
/// falling back to the string itself. An empty body becomes `null`.
pub fn normalize_body(raw: &[u8]) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }

    let value = serde_json::from_slice(raw)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(raw).into_owned()));

    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

/// Pick the profile out of a normalized body.
pub fn extract_candidate(body: Value) -> Value {
    match body {
        Value::Object(mut map) => match map.remove(USER_DATA_FIELD) {
            Some(inner) if !inner.is_null() => inner,
            _ => Value::Object(map),
        },
        other => other,
    }
}
