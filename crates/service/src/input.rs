//! Loose JSON field readers. Request bodies arrive as raw values so that every
//! malformed field can be reported in one response.

use serde_json::Value;

/// Positive id given as a JSON number or a numeric string. `Ok(None)` when absent or null.
pub fn optional_id(field: &str, raw: Option<&Value>) -> Result<Option<i32>, String> {
    let parsed = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(id) if id > 0 => Ok(Some(id)),
        _ => Err(format!("{field} must be a positive integer")),
    }
}

pub fn required_id(field: &str, raw: Option<&Value>) -> Result<i32, String> {
    optional_id(field, raw)?.ok_or_else(|| format!("{field} is required"))
}

/// Trimmed text; `Ok(None)` when absent, null or blank.
pub fn optional_text(field: &str, raw: Option<&Value>) -> Result<Option<String>, String> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string()).filter(|s| !s.is_empty())),
        Some(_) => Err(format!("{field} must be a string")),
    }
}

pub fn required_text(field: &str, raw: Option<&Value>) -> Result<String, String> {
    optional_text(field, raw)?.ok_or_else(|| format!("{field} is required"))
}
