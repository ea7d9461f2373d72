//! Conversion of caller attribute values into typed component properties.

use crate::errors::PropertyError;

/// A boolean property is false only for `false` or `0`; a bare name is true.
pub fn parse_bool(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) => v != "false" && v != "0",
        None => true,
    }
}

/// A decimal integer property.
pub fn parse_int(property: &str, value: Option<&str>) -> Result<i64, PropertyError> {
    let raw = value.unwrap_or_default();
    raw.trim().parse::<i64>().map_err(|err| PropertyError {
        property: property.to_string(),
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

/// A text property, verbatim. A bare name gives an empty string.
pub fn parse_text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}
