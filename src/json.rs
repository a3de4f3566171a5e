//! JSON codec helpers.
//!
//! Thin wrappers over `serde_json` that log and swallow codec failures,
//! for the places where a missing rendering is acceptable (envelope bodies,
//! log output).

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes a value to a JSON string.
///
/// Returns `None` (and logs) when the value cannot be represented as JSON.
#[must_use]
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Error converting value to JSON: {e}");
            None
        }
    }
}

/// Deserializes a JSON string into `T`.
///
/// Returns `None` (and logs) when the text is not valid JSON for `T`.
#[must_use]
pub fn from_json<T: DeserializeOwned>(json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("Error reading JSON: {e}");
            None
        }
    }
}

/// Renders a raw error body as JSON.
///
/// Bodies that already are JSON are kept verbatim; anything else becomes
/// a JSON string literal. Empty bodies render as `null`.
#[must_use]
pub fn error_body(raw: &[u8]) -> String {
    if raw.is_empty() {
        return "null".to_string();
    }
    if serde_json::from_slice::<serde_json::Value>(raw).is_ok() {
        return String::from_utf8_lossy(raw).into_owned();
    }
    let text = String::from_utf8_lossy(raw);
    to_json(text.as_ref()).unwrap_or_else(|| "null".to_string())
}
