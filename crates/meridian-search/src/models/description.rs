//! Concrete attribute values validated against a data model.

use std::collections::BTreeMap;
use std::fmt;

use super::data_model::{DataModel, generate_data_model};
use super::value::AttributeValue;
use crate::error::{AttributeInconsistency, SchemaError};

/// A set of attribute values conforming to a data model.
///
/// Describes an advertised service or the properties of an agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    values: BTreeMap<String, AttributeValue>,
    data_model: DataModel,
}

impl Description {
    /// Creates a description whose data model is synthesized from the values,
    /// with every attribute required.
    ///
    /// # Errors
    /// Never fails for a synthesized model; the `Result` keeps the
    /// constructors uniform.
    pub fn new<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Result<Self, SchemaError>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Self::with_data_model_name(values, "")
    }

    /// Like [`Description::new`], naming the synthesized data model.
    pub fn with_data_model_name<K, V>(
        values: impl IntoIterator<Item = (K, V)>,
        data_model_name: &str,
    ) -> Result<Self, SchemaError>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let values = collect_values(values);
        let data_model = generate_data_model(data_model_name, &values);
        Self::from_parts(values, data_model)
    }

    /// Creates a description validated against an explicit data model.
    ///
    /// # Errors
    /// * `AttributeInconsistency::MissingRequiredAttribute` - A required attribute has no value
    /// * `AttributeInconsistency::ExtraAttribute` - A value names an undeclared attribute
    /// * `AttributeInconsistency::IncorrectType` - A value's type differs from the declared one
    pub fn with_data_model<K, V>(
        values: impl IntoIterator<Item = (K, V)>,
        data_model: DataModel,
    ) -> Result<Self, SchemaError>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Self::from_parts(collect_values(values), data_model)
    }

    pub(crate) fn from_parts(
        values: BTreeMap<String, AttributeValue>,
        data_model: DataModel,
    ) -> Result<Self, SchemaError> {
        check_consistency(&values, &data_model)?;
        Ok(Self { values, data_model })
    }

    /// All values keyed by attribute name.
    pub fn values(&self) -> &BTreeMap<String, AttributeValue> {
        &self.values
    }

    /// The value of one attribute, if present.
    pub fn value(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// The data model the values conform to.
    pub fn data_model(&self) -> &DataModel {
        &self.data_model
    }

    /// Attribute names carrying a value.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the description carries no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn collect_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> BTreeMap<String, AttributeValue>
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    values.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

fn check_consistency(
    values: &BTreeMap<String, AttributeValue>,
    data_model: &DataModel,
) -> Result<(), AttributeInconsistency> {
    if let Some(missing) =
        data_model.required_attributes().find(|attribute| !values.contains_key(attribute.name()))
    {
        return Err(AttributeInconsistency::MissingRequiredAttribute(missing.name().to_string()));
    }

    if let Some(extra) = values.keys().find(|key| data_model.attribute(key).is_none()) {
        return Err(AttributeInconsistency::ExtraAttribute(extra.clone()));
    }

    for (key, value) in values {
        let Some(attribute) = data_model.attribute(key) else {
            return Err(AttributeInconsistency::ExtraAttribute(key.clone()));
        };
        if value.attribute_type() != attribute.attribute_type() {
            return Err(AttributeInconsistency::IncorrectType {
                attribute: key.clone(),
                expected: attribute.attribute_type(),
                found: value.attribute_type(),
            });
        }
    }

    Ok(())
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Description(values={")?;
        for (index, (key, value)) in self.values.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}},data_model={})", self.data_model)
    }
}
