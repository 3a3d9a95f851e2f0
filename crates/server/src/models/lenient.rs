//! Forgiving deserializers for caller-supplied text fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a free-text field, accepting `null` and JSON scalars.
///
/// `null` becomes an empty string; numbers and booleans keep their JSON
/// spelling.
///
/// # Errors
///
/// Returns the deserializer's error for arrays and objects.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            kind(&other)
        ))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
        _ => "a scalar",
    }
}
