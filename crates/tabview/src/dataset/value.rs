//! Cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// The store keeps everything as text. Numeric interpretation only happens
/// inside the sort comparator through [`Value::is_numeric`] and
/// [`Value::as_number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Value {
    /// Non-empty text.
    Text(String),
    /// Missing or empty cell.
    #[default]
    Empty,
}

impl Value {
    /// Build a value from raw text; the empty string becomes [`Value::Empty`].
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Value::Empty
        } else {
            Value::Text(text)
        }
    }

    /// String form of the value (`""` for empty cells).
    pub fn as_str(&self) -> &str {
        match self {
            Value::Text(s) => s,
            Value::Empty => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Whether the whole trimmed text is a finite number.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Numeric reading of the value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Value::Empty => None,
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::new(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::new(text)
    }
}

impl From<Value> for String {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => s,
            Value::Empty => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
