//! Property values mirrored by a host property panel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
}

impl Property {
    pub fn number(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value: PropertyValue::Number(value),
        }
    }

    pub fn string(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: PropertyValue::String(value.into()),
        }
    }

    pub fn bool(name: &str, value: bool) -> Self {
        Self {
            name: name.to_string(),
            value: PropertyValue::Bool(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Number(f64),
    String(String),
    Bool(bool),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Look up a property by name in a property list.
pub fn find_property<'a>(properties: &'a [Property], name: &str) -> Option<&'a PropertyValue> {
    properties.iter().find(|p| p.name == name).map(|p| &p.value)
}
