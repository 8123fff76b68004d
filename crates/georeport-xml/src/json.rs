//! JSON text ↔ [`Value`] helpers.
//!
//! Callers on the JSON side of format negotiation use these to move payloads in and out of the
//! same value tree the XML encoder consumes. Object key order is preserved.

use crate::error::Result;
use crate::value::Value;

/// Parses a JSON document into a value.
///
/// # Examples
///
/// ```
/// use georeport_xml::json::from_json_str;
///
/// let value = from_json_str(r#"{"service_code": "001", "metadata": true}"#)?;
/// assert!(value.has_key("metadata"));
/// # Ok::<(), georeport_xml::XmlError>(())
/// ```
pub fn from_json_str(s: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(s)?;
    Ok(Value::from(json))
}

/// Parses a JSON byte slice into a value.
pub fn from_json_slice(v: &[u8]) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_slice(v)?;
    Ok(Value::from(json))
}

/// Serializes a value to a compact JSON string.
pub fn to_json_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serializes a value to a pretty-printed JSON string.
pub fn to_json_string_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
