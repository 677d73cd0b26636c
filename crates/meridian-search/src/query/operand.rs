//! Typed operands for each family of constraint operator.
//!
//! Each type only admits the value shapes its operators accept, so a
//! constraint built from them is well-formed by construction.

use std::cmp::Ordering;
use std::fmt;

use crate::error::SchemaError;
use crate::models::{AttributeType, AttributeValue, Location};

/// Untyped operand, as supplied to [`ConstraintType::new`](super::ConstraintType::new).
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A single value.
    Value(AttributeValue),
    /// A tuple of values: a range, a set, or a `(center, radius)` pair.
    Tuple(Vec<AttributeValue>),
}

impl Operand {
    /// Builds a single-value operand.
    pub fn value(value: impl Into<AttributeValue>) -> Self {
        Self::Value(value.into())
    }

    /// Builds a tuple operand.
    pub fn tuple<V: Into<AttributeValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::Tuple(values.into_iter().map(Into::into).collect())
    }
}

/// Operand of `==` and `!=`.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Text.
    String(String),
    /// Integer.
    Integer(i64),
    /// Float.
    Float(f64),
    /// Boolean.
    Boolean(bool),
}

impl ScalarValue {
    /// Type of the operand.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::String(_) => AttributeType::String,
            Self::Integer(_) => AttributeType::Integer,
            Self::Float(_) => AttributeType::Float,
            Self::Boolean(_) => AttributeType::Boolean,
        }
    }

    /// Whether `value` equals this operand. Values of another type never do.
    pub fn matches(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::String(a), AttributeValue::String(b)) => a == b,
            (Self::Integer(a), AttributeValue::Integer(b)) => a == b,
            (Self::Float(a), AttributeValue::Float(b)) => a == b,
            (Self::Boolean(a), AttributeValue::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl TryFrom<AttributeValue> for ScalarValue {
    type Error = SchemaError;

    fn try_from(value: AttributeValue) -> Result<Self, Self::Error> {
        match value {
            AttributeValue::String(s) => Ok(Self::String(s)),
            AttributeValue::Integer(i) => Ok(Self::Integer(i)),
            AttributeValue::Float(x) => Ok(Self::Float(x)),
            AttributeValue::Boolean(b) => Ok(Self::Boolean(b)),
            AttributeValue::Location(location) => Err(SchemaError::InvalidConstraintType(format!(
                "Expected one of type in (int, float, str, bool), got {location}"
            ))),
        }
    }
}

impl From<ScalarValue> for AttributeValue {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::String(s) => Self::String(s),
            ScalarValue::Integer(i) => Self::Integer(i),
            ScalarValue::Float(x) => Self::Float(x),
            ScalarValue::Boolean(b) => Self::Boolean(b),
        }
    }
}

impl From<OrderedValue> for ScalarValue {
    fn from(value: OrderedValue) -> Self {
        match value {
            OrderedValue::String(s) => Self::String(s),
            OrderedValue::Integer(i) => Self::Integer(i),
            OrderedValue::Float(x) => Self::Float(x),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Operand of `<`, `<=`, `>` and `>=`.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderedValue {
    /// Text, ordered lexicographically.
    String(String),
    /// Integer.
    Integer(i64),
    /// Float.
    Float(f64),
}

impl OrderedValue {
    /// Type of the operand.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::String(_) => AttributeType::String,
            Self::Integer(_) => AttributeType::Integer,
            Self::Float(_) => AttributeType::Float,
        }
    }

    /// Ordering of `value` relative to this operand.
    ///
    /// `None` when the types differ or a float comparison involves NaN.
    pub fn compare(&self, value: &AttributeValue) -> Option<Ordering> {
        match (self, value) {
            (Self::String(a), AttributeValue::String(b)) => Some(b.as_str().cmp(a.as_str())),
            (Self::Integer(a), AttributeValue::Integer(b)) => Some(b.cmp(a)),
            (Self::Float(a), AttributeValue::Float(b)) => b.partial_cmp(a),
            _ => None,
        }
    }
}

impl TryFrom<AttributeValue> for OrderedValue {
    type Error = SchemaError;

    fn try_from(value: AttributeValue) -> Result<Self, Self::Error> {
        match value {
            AttributeValue::String(s) => Ok(Self::String(s)),
            AttributeValue::Integer(i) => Ok(Self::Integer(i)),
            AttributeValue::Float(x) => Ok(Self::Float(x)),
            other => Err(SchemaError::InvalidConstraintType(format!(
                "Expected one of type in (int, float, str), got {other}"
            ))),
        }
    }
}

impl From<OrderedValue> for AttributeValue {
    fn from(value: OrderedValue) -> Self {
        AttributeValue::from(ScalarValue::from(value))
    }
}

impl From<&str> for OrderedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OrderedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for OrderedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for OrderedValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for OrderedValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AttributeValue::from(self.clone()))
    }
}

impl fmt::Display for OrderedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", AttributeValue::from(self.clone()))
    }
}

/// Inclusive bounds of a `within` constraint. Both bounds share one type.
#[derive(Debug, Clone, PartialEq)]
pub enum Range {
    /// Lexicographic text range.
    String(String, String),
    /// Integer range.
    Integer(i64, i64),
    /// Float range.
    Float(f64, f64),
}

impl Range {
    /// Type of both bounds.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::String(..) => AttributeType::String,
            Self::Integer(..) => AttributeType::Integer,
            Self::Float(..) => AttributeType::Float,
        }
    }

    /// Whether `low <= value <= high`. Values of another type are never contained.
    pub fn contains(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::String(low, high), AttributeValue::String(v)) => {
                low.as_str() <= v.as_str() && v.as_str() <= high.as_str()
            }
            (Self::Integer(low, high), AttributeValue::Integer(v)) => (*low..=*high).contains(v),
            (Self::Float(low, high), AttributeValue::Float(v)) => *low <= *v && *v <= *high,
            _ => false,
        }
    }

    /// The bounds as attribute values.
    pub fn bounds(&self) -> (AttributeValue, AttributeValue) {
        match self {
            Self::String(low, high) => (low.clone().into(), high.clone().into()),
            Self::Integer(low, high) => ((*low).into(), (*high).into()),
            Self::Float(low, high) => ((*low).into(), (*high).into()),
        }
    }
}

impl TryFrom<(AttributeValue, AttributeValue)> for Range {
    type Error = SchemaError;

    fn try_from(bounds: (AttributeValue, AttributeValue)) -> Result<Self, Self::Error> {
        match bounds {
            (AttributeValue::String(low), AttributeValue::String(high)) => Ok(Self::String(low, high)),
            (AttributeValue::Integer(low), AttributeValue::Integer(high)) => Ok(Self::Integer(low, high)),
            (AttributeValue::Float(low), AttributeValue::Float(high)) => Ok(Self::Float(low, high)),
            (low, high) if low.attribute_type() != high.attribute_type() => {
                Err(SchemaError::InvalidConstraintType(format!(
                    "Invalid types. Range bounds differ: {} and {}",
                    low.attribute_type(),
                    high.attribute_type()
                )))
            }
            (low, _) => Err(SchemaError::InvalidConstraintType(format!(
                "Invalid type for range bounds. Expected either of (int, float, str). Found {}.",
                low.attribute_type()
            ))),
        }
    }
}

impl From<(i64, i64)> for Range {
    fn from((low, high): (i64, i64)) -> Self {
        Self::Integer(low, high)
    }
}

impl From<(i32, i32)> for Range {
    fn from((low, high): (i32, i32)) -> Self {
        Self::Integer(i64::from(low), i64::from(high))
    }
}

impl From<(f64, f64)> for Range {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Float(low, high)
    }
}

impl From<(&str, &str)> for Range {
    fn from((low, high): (&str, &str)) -> Self {
        Self::String(low.to_string(), high.to_string())
    }
}

impl From<(String, String)> for Range {
    fn from((low, high): (String, String)) -> Self {
        Self::String(low, high)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (low, high) = self.bounds();
        write!(f, "({low}, {high})")
    }
}

/// Homogeneous members of an `in` / `not_in` constraint.
///
/// An empty set still carries its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSet {
    /// Text members.
    String(Vec<String>),
    /// Integer members.
    Integer(Vec<i64>),
    /// Float members.
    Float(Vec<f64>),
    /// Boolean members.
    Boolean(Vec<bool>),
    /// Location members.
    Location(Vec<Location>),
}

impl ValueSet {
    /// Element type.
    pub fn data_type(&self) -> AttributeType {
        match self {
            Self::String(_) => AttributeType::String,
            Self::Integer(_) => AttributeType::Integer,
            Self::Float(_) => AttributeType::Float,
            Self::Boolean(_) => AttributeType::Boolean,
            Self::Location(_) => AttributeType::Location,
        }
    }

    /// Whether `value` is a member. Values of another type never are.
    pub fn contains(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::String(set), AttributeValue::String(v)) => set.contains(v),
            (Self::Integer(set), AttributeValue::Integer(v)) => set.contains(v),
            (Self::Float(set), AttributeValue::Float(v)) => set.contains(v),
            (Self::Boolean(set), AttributeValue::Boolean(v)) => set.contains(v),
            (Self::Location(set), AttributeValue::Location(v)) => set.contains(v),
            _ => false,
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        match self {
            Self::String(set) => set.len(),
            Self::Integer(set) => set.len(),
            Self::Float(set) => set.len(),
            Self::Boolean(set) => set.len(),
            Self::Location(set) => set.len(),
        }
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members as attribute values.
    pub fn to_values(&self) -> Vec<AttributeValue> {
        match self {
            Self::String(set) => set.iter().cloned().map(AttributeValue::from).collect(),
            Self::Integer(set) => set.iter().copied().map(AttributeValue::from).collect(),
            Self::Float(set) => set.iter().copied().map(AttributeValue::from).collect(),
            Self::Boolean(set) => set.iter().copied().map(AttributeValue::from).collect(),
            Self::Location(set) => set.iter().copied().map(AttributeValue::from).collect(),
        }
    }
}

impl TryFrom<Vec<AttributeValue>> for ValueSet {
    type Error = SchemaError;

    /// The element type is taken from the first member. An empty list
    /// becomes an empty text set.
    fn try_from(values: Vec<AttributeValue>) -> Result<Self, Self::Error> {
        let Some(first) = values.first().map(AttributeValue::attribute_type) else {
            return Ok(Self::String(Vec::new()));
        };
        if values.iter().any(|value| value.attribute_type() != first) {
            return Err(SchemaError::InvalidConstraintType(format!(
                "Invalid types. Set members must all be of type {first}"
            )));
        }

        macro_rules! collect {
            ($variant:ident) => {
                Self::$variant(
                    values
                        .into_iter()
                        .filter_map(|value| match value {
                            AttributeValue::$variant(v) => Some(v),
                            _ => None,
                        })
                        .collect(),
                )
            };
        }

        Ok(match first {
            AttributeType::String => collect!(String),
            AttributeType::Integer => collect!(Integer),
            AttributeType::Float => collect!(Float),
            AttributeType::Boolean => collect!(Boolean),
            AttributeType::Location => collect!(Location),
        })
    }
}

impl From<Vec<String>> for ValueSet {
    fn from(values: Vec<String>) -> Self {
        Self::String(values)
    }
}

impl From<Vec<&str>> for ValueSet {
    fn from(values: Vec<&str>) -> Self {
        Self::String(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<i64>> for ValueSet {
    fn from(values: Vec<i64>) -> Self {
        Self::Integer(values)
    }
}

impl From<Vec<i32>> for ValueSet {
    fn from(values: Vec<i32>) -> Self {
        Self::Integer(values.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<f64>> for ValueSet {
    fn from(values: Vec<f64>) -> Self {
        Self::Float(values)
    }
}

impl From<Vec<bool>> for ValueSet {
    fn from(values: Vec<bool>) -> Self {
        Self::Boolean(values)
    }
}

impl From<Vec<Location>> for ValueSet {
    fn from(values: Vec<Location>) -> Self {
        Self::Location(values)
    }
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, value) in self.to_values().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

/// Center and radius, in kilometers, of a `distance` constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    /// Center of the search area.
    pub center: Location,
    /// Maximum great-circle distance from the center, inclusive.
    pub radius: f64,
}

impl Distance {
    /// Creates a distance operand.
    pub fn new(center: Location, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether `location` lies within the radius.
    pub fn contains(&self, location: &Location) -> bool {
        self.center.distance(location) <= self.radius
    }
}

impl TryFrom<Vec<AttributeValue>> for Distance {
    type Error = SchemaError;

    fn try_from(values: Vec<AttributeValue>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [AttributeValue::Location(center), AttributeValue::Float(radius)] => {
                Ok(Self::new(*center, *radius))
            }
            [_, _] => Err(SchemaError::InvalidConstraintType(
                "Invalid type, expected (Location, float).".to_string(),
            )),
            other => Err(SchemaError::InvalidConstraintType(format!(
                "Expected length=2, got {}",
                other.len()
            ))),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.center, self.radius)
    }
}
