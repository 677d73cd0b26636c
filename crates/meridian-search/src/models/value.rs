//! Attribute types and the closed set of values they admit.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::Location;

/// The type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// UTF-8 text.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// Double precision float.
    Float,
    /// Boolean flag.
    Boolean,
    /// Geographic point.
    Location,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "str",
            Self::Integer => "int",
            Self::Float => "float",
            Self::Boolean => "bool",
            Self::Location => "Location",
        };
        f.write_str(name)
    }
}

/// A value held by a description or used as a constraint operand.
///
/// Values of different variants never compare equal: `Integer(1)` is not
/// `Float(1.0)` and `Boolean(true)` is not `Integer(1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// Location value.
    Location(Location),
}

impl AttributeValue {
    /// The runtime type of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::String(_) => AttributeType::String,
            Self::Integer(_) => AttributeType::Integer,
            Self::Float(_) => AttributeType::Float,
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Location(_) => AttributeType::Location,
        }
    }

    /// Returns the location payload, if any.
    pub fn as_location(&self) -> Option<&Location> {
        match self {
            Self::Location(location) => Some(location),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => f.write_str(if *b { "True" } else { "False" }),
            Self::Location(location) => write!(f, "{location}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Location> for AttributeValue {
    fn from(value: Location) -> Self {
        Self::Location(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_of_values() {
        assert_eq!(AttributeValue::from("x").attribute_type(), AttributeType::String);
        assert_eq!(AttributeValue::from(1).attribute_type(), AttributeType::Integer);
        assert_eq!(AttributeValue::from(1.0).attribute_type(), AttributeType::Float);
        assert_eq!(AttributeValue::from(true).attribute_type(), AttributeType::Boolean);
        assert_eq!(
            AttributeValue::from(Location::new(0.0, 0.0)).attribute_type(),
            AttributeType::Location
        );
    }

    #[test]
    fn test_no_implicit_widening() {
        assert_ne!(AttributeValue::Integer(1), AttributeValue::Float(1.0));
        assert_ne!(AttributeValue::Integer(1), AttributeValue::Boolean(true));
        assert_ne!(AttributeValue::Integer(0), AttributeValue::Boolean(false));
    }

    #[test]
    fn test_as_location() {
        let location = Location::new(1.0, 2.0);
        assert_eq!(AttributeValue::from(location).as_location(), Some(&location));
        assert_eq!(AttributeValue::from(3).as_location(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from("Stephen King").to_string(), "Stephen King");
        assert_eq!(AttributeValue::from(12).to_string(), "12");
        assert_eq!(AttributeValue::from(10.4).to_string(), "10.4");
        assert_eq!(AttributeValue::from(true).to_string(), "True");
        assert_eq!(AttributeType::Location.to_string(), "Location");
    }

    #[test]
    fn test_value_serde_is_tagged() {
        let json = serde_json::to_string(&AttributeValue::Integer(1991)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":1991}"#);
        let back: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AttributeValue::Integer(1991));
    }
}
