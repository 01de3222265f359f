//! Value coercions applied by `Coerce` rules.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::LazyLock;

use crate::core::value::scalar_text;
use crate::schema::ValueKind;

#[allow(clippy::expect_used)]
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("numeric pattern compiles"));

#[allow(clippy::expect_used)]
static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern compiles"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest magnitude stored as a JSON integer after coercion.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts `value` to `kind`, or `None` when it cannot be converted.
#[must_use]
pub fn coerce(value: &Value, kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::Text => scalar_text(value).map(Value::String),
        ValueKind::Number => to_number(value),
        ValueKind::Integer => to_integer(value),
        ValueKind::Boolean => to_boolean(value),
        ValueKind::Phone => to_phone(value),
        ValueKind::Date => to_date(value),
    }
}

/// Numeric reading of a value.
///
/// Accepts JSON numbers and plain decimal strings such as `"12"`,
/// `" -3.5 "`. Exponents, hex and empty strings are rejected.
#[must_use]
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if NUMERIC.is_match(trimmed) {
                trimmed.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

fn to_number(value: &Value) -> Option<Value> {
    if let Value::Number(n) = value {
        if n.is_i64() || n.is_u64() {
            return Some(value.clone());
        }
    }
    parse_number(value).and_then(number_value)
}

fn to_integer(value: &Value) -> Option<Value> {
    to_number(value).filter(|v| v.is_i64() || v.is_u64())
}

#[allow(clippy::cast_possible_truncation)]
fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        Some(Value::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

fn to_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn to_phone(value: &Value) -> Option<Value> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_u64() => n.to_string(),
        _ => return None,
    };
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    let digits = compact.strip_prefix("+91").unwrap_or(&compact);
    MOBILE
        .is_match(digits)
        .then(|| Value::String(digits.to_string()))
}

fn to_date(value: &Value) -> Option<Value> {
    let text = value.as_str()?;
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .ok()
        .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
}
