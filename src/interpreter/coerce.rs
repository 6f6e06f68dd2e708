//! Defensive value coercion
//!
//! Inferred field types are advisory only, so every operation coerces
//! at the point of use. Numeric coercion follows the loose rules the
//! record data was born under: booleans coerce to 0/1, numeric strings
//! parse after trimming, the empty string is 0, and anything else is
//! not a number.

use serde_json::{Number, Value};

/// Coerces a value to a number, or `None` when it has no numeric form
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// String form of a value for comparisons and group keys
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Compact JSON text for arrays and objects
        other => other.to_string(),
    }
}

/// Lowercased string form, for case-insensitive comparisons
pub fn as_lower_text(value: &Value) -> String {
    as_text(value).to_lowercase()
}

/// Builds a JSON number, preferring the integer form when exact.
/// Non-finite inputs degrade to 0.
pub fn number_value(x: f64) -> Value {
    if !x.is_finite() {
        return Value::Number(Number::from(0));
    }
    if x.fract() == 0.0 && x.abs() < i64::MAX as f64 {
        return Value::Number(Number::from(x as i64));
    }
    Number::from_f64(x)
        .map(Value::Number)
        .unwrap_or_else(|| Value::Number(Number::from(0)))
}

/// Rounds to two decimal places, the precision aggregate results carry
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
