//! Schema attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::AttributeType;

/// A named, typed field of a data model.
///
/// Equality ignores the human-readable description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    is_required: bool,
    #[serde(default)]
    description: String,
}

impl Attribute {
    /// Creates an attribute with an empty description.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType, is_required: bool) -> Self {
        Self { name: name.into(), attribute_type, is_required, description: String::new() }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type.
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    /// Whether descriptions must carry a value for this attribute.
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Human-readable description, empty if none was given.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attribute_type == other.attribute_type
            && self.is_required == other.is_required
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attribute(name={},type={},is_required={})",
            self.name, self.attribute_type, self.is_required
        )
    }
}
