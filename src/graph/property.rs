//! Property values carried by nodes and edges

use std::collections::HashMap;

/// A property value: names and descriptions are strings, similarity
/// scores are floats. `Null` stands for a value the server returned empty.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Float(f64),
    Null,
}

impl PropertyValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Read a scalar out of a query result row. Numbers become floats;
    /// booleans, arrays and objects have no counterpart and map to `Null`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => PropertyValue::String(s.clone()),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(PropertyValue::Float)
                .unwrap_or(PropertyValue::Null),
            _ => PropertyValue::Null,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

/// Property map for storing node and edge properties
pub type PropertyMap = HashMap<String, PropertyValue>;
