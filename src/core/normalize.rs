//! Response normalization: turn a raw payload into displayable markdown source.
//!
//! Backends sometimes hand back a JSON-stringified answer (`"\"# Title\\nbody\""`),
//! so the outer quotes and escaped newlines survive into the content field.

use serde_json::Value;

/// Strip one pair of surrounding double quotes, then turn literal `\n` into newlines.
///
/// A lone `"` counts as both the opening and the closing quote and yields `""`.
pub fn normalize_response(raw: &str) -> String {
    let unquoted = match raw.strip_prefix('"') {
        Some(inner) if raw.ends_with('"') => inner.strip_suffix('"').unwrap_or(inner),
        _ => raw,
    };
    unquoted.replace("\\n", "\n")
}

/// Normalize a JSON value: strings go through [`normalize_response`], anything else is returned as is.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(normalize_response(&s)),
        other => other,
    }
}
