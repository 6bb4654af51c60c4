//! Request field validation.
//!
//! Both request fields go through the same two stages before they reach the
//! database:
//!
//! ```text
//! JSON value ──► field_as_string() ──► normalize ──► typed value
//!                (loose coercion)      (strip/trim)   (ZipCode / Measure)
//! ```
//!
//! Coercion is deliberately loose: a missing field, `null`, `false`, `0` and
//! the empty string all become `""`, numbers use their JSON text, and arrays
//! join their elements with commas. Normalization then strips characters the
//! field can never contain, so the only hard failures are the final shape
//! checks.

mod measure;
mod zip;

pub use measure::Measure;
pub use zip::{ZipCode, ZIP_CODE_LEN};

use serde_json::Value;

/// Numbers at or above this magnitude are rendered in exponent form.
const MAX_PLAIN_INTEGER: f64 = 1e21;

/// Read `key` from a JSON request body and coerce it to a string.
///
/// Returns an empty string when the body is not an object, the key is
/// missing, or the value is falsy (`null`, `false`, `0`, `""`).
pub fn field_as_string(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(value) if is_truthy(value) => coerce(value),
        _ => String::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn coerce(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // 10001.0 reads as "10001", not "10001.0"
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_PLAIN_INTEGER => {
                format!("{:.0}", f)
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
