//! Attributes and their values.

use smallvec::SmallVec;
use std::fmt;

/// An attribute parsed from markup. A name without value is a boolean attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    /// A boolean (name only) attribute.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn is_flag(&self) -> bool {
        self.value.is_none()
    }

    /// The value as stored in an attribute store.
    pub fn to_value(&self) -> AttrValue {
        match &self.value {
            Some(v) => AttrValue::Text(v.clone()),
            None => AttrValue::Flag,
        }
    }
}

/// Attributes in source order. Most tags carry only a few.
pub type Attributes = SmallVec<[Attribute; 4]>;

/// The value held by an attribute store entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    /// Present, without value.
    Flag,
    Number(f64),
    Integer(i64),
    Text(String),
}

impl AttrValue {
    /// The unformatted string form, empty for a flag.
    pub fn as_text(&self) -> String {
        match self {
            AttrValue::Flag => String::new(),
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Integer(n) => n.to_string(),
            AttrValue::Text(s) => s.clone(),
        }
    }

    /// Render the value as it appears after `name=`, or `None` when the
    /// attribute renders as a bare name.
    ///
    /// - empty or `false` (any case): bare name
    /// - `true` (any case): unquoted `true`
    /// - decimal numbers: unquoted
    /// - anything else: quoted with `"`, or `'` when the value holds a `"`
    pub fn render(&self) -> Option<String> {
        match self {
            AttrValue::Flag => None,
            AttrValue::Number(n) if n.is_finite() => Some(n.to_string()),
            AttrValue::Number(n) => Some(quote(&n.to_string())),
            AttrValue::Integer(n) => Some(n.to_string()),
            AttrValue::Text(s) => render_text(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        if b {
            AttrValue::Flag
        } else {
            AttrValue::Text("false".to_string())
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Integer(n)
    }
}

impl From<Option<&str>> for AttrValue {
    fn from(value: Option<&str>) -> Self {
        match value {
            Some(s) => AttrValue::Text(s.to_string()),
            None => AttrValue::Flag,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

fn render_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("false") {
        return None;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Some("true".to_string());
    }
    if is_decimal(trimmed) {
        return Some(trimmed.to_string());
    }
    Some(quote(value))
}

/// Finite decimal numbers only; `NaN` and `inf` spellings stay quoted.
fn is_decimal(s: &str) -> bool {
    s.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

fn quote(value: &str) -> String {
    match (value.contains('"'), value.contains('\'')) {
        (false, _) => format!("\"{value}\""),
        (true, false) => format!("'{value}'"),
        // both delimiters inside: escape the double quotes
        (true, true) => format!("\"{}\"", value.replace('"', "&quot;")),
    }
}
