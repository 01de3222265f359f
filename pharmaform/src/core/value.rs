//! Helpers for inspecting raw JSON form values.

use serde_json::Value;

/// True when a form value counts as "not provided".
///
/// Missing keys, `null` and whitespace-only strings are all absent.
#[must_use]
pub fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Text form of a scalar value, used by length, pattern and option rules.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
