//! Named schemas of typed attributes.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::attribute::Attribute;
use super::value::AttributeValue;
use crate::error::SchemaError;

/// A named set of attributes, kept sorted by attribute name.
///
/// Attribute names are unique. Equality compares the name and the
/// attribute list; the description is informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "DataModelFields")]
pub struct DataModel {
    name: String,
    attributes: Vec<Attribute>,
    description: String,
}

#[derive(Deserialize)]
struct DataModelFields {
    name: String,
    attributes: Vec<Attribute>,
    #[serde(default)]
    description: String,
}

impl TryFrom<DataModelFields> for DataModel {
    type Error = SchemaError;

    fn try_from(fields: DataModelFields) -> Result<Self, Self::Error> {
        Ok(Self::new(fields.name, fields.attributes)?.with_description(fields.description))
    }
}

impl DataModel {
    /// Creates a data model, sorting the attributes by name.
    ///
    /// # Errors
    /// * `SchemaError::DuplicateAttribute` - If two attributes share a name
    pub fn new(name: impl Into<String>, mut attributes: Vec<Attribute>) -> Result<Self, SchemaError> {
        attributes.sort_by(|a, b| a.name().cmp(b.name()));
        if let Some(pair) = attributes.windows(2).find(|pair| pair[0].name() == pair[1].name()) {
            return Err(SchemaError::DuplicateAttribute(pair[0].name().to_string()));
        }
        Ok(Self { name: name.into(), attributes, description: String::new() })
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes, sorted by name.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .binary_search_by(|attribute| attribute.name().cmp(name))
            .ok()
            .map(|index| &self.attributes[index])
    }

    /// Attributes keyed by name.
    pub fn attributes_by_name(&self) -> HashMap<&str, &Attribute> {
        self.attributes.iter().map(|attribute| (attribute.name(), attribute)).collect()
    }

    /// Attributes that descriptions must supply.
    pub fn required_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|attribute| attribute.is_required())
    }
}

impl PartialEq for DataModel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.attributes == other.attributes
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataModel(name={},attributes={{", self.name)?;
        for (index, attribute) in self.attributes.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", attribute.name(), attribute)?;
        }
        write!(f, "}},description={})", self.description)
    }
}

/// Builds a data model in which every supplied key is a required attribute
/// typed after its value.
pub fn generate_data_model(
    name: impl Into<String>,
    values: &BTreeMap<String, AttributeValue>,
) -> DataModel {
    // BTreeMap keys are unique and already sorted.
    let attributes = values
        .iter()
        .map(|(key, value)| Attribute::new(key.clone(), value.attribute_type(), true))
        .collect();
    DataModel { name: name.into(), attributes, description: String::new() }
}
