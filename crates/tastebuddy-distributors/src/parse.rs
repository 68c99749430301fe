//! Defensive scalar parsing shared by adapters.
//!
//! Distributors are inconsistent about whether numbers arrive as JSON numbers
//! or as strings, and occasionally send neither. These helpers never fail the
//! record: they return the documented default and report a
//! [`FieldParseError`] to the sink.

use crate::error::FieldParseError;
use crate::sink::LogSink;

/// Parses a coordinate axis from a JSON number or numeric string.
///
/// # Errors
///
/// Returns [`FieldParseError`] when the value is missing, empty, not numeric,
/// or not finite.
pub fn coordinate_from_json(
    field: &'static str,
    value: Option<&serde_json::Value>,
) -> Result<f64, FieldParseError> {
    let fail = |raw: String, reason: &str| FieldParseError {
        field,
        value: raw,
        reason: reason.to_owned(),
    };

    let parsed = match value {
        None | Some(serde_json::Value::Null) => return Err(fail(String::new(), "missing")),
        Some(serde_json::Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(fail(raw.clone(), "empty"));
            }
            trimmed
                .parse::<f64>()
                .map_err(|e| fail(raw.clone(), &e.to_string()))?
        }
        Some(serde_json::Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| fail(number.to_string(), "number out of range"))?,
        Some(other) => return Err(fail(other.to_string(), "expected a number or string")),
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(fail(parsed.to_string(), "not a finite number"))
    }
}

/// Like [`coordinate_from_json`], but substitutes `0.0` on failure and
/// reports the failure to `sink` under `operation`.
pub fn coordinate_or_default(
    sink: &dyn LogSink,
    operation: &str,
    field: &'static str,
    value: Option<&serde_json::Value>,
) -> f64 {
    coordinate_from_json(field, value).unwrap_or_else(|e| {
        sink.warn(operation, &format!("{e}; defaulting to 0"));
        0.0
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
