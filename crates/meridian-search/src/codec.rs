//! Conversions between the model types and their protobuf messages.
//!
//! Encoding is total: every model value has a wire form. Decoding re-runs
//! the same validation as the constructors, so a decoded value upholds
//! every invariant a locally built one does.

use std::collections::BTreeMap;

use prost::Message;
use tracing::trace;

use crate::error::CodecError;
use crate::models::{Attribute, AttributeType, AttributeValue, DataModel, Description, Location};
use crate::proto;
use crate::query::{
    Constraint, ConstraintExpr, ConstraintOperator, ConstraintType, Operand, OrderedValue, Query,
    Range, ScalarValue, ValueSet,
};

/// Binary serialization of a top-level search value.
pub trait WireCodec: Sized {
    /// Encodes the value as protobuf bytes.
    fn encode(&self) -> Vec<u8>;

    /// Decodes and validates a value.
    ///
    /// # Errors
    /// * `CodecError::Decode` - If the bytes are not a well-formed message
    /// * `CodecError::MissingField` / `CodecError::MissingOneof` - If a required part is absent
    /// * `CodecError::UnknownEnumValue` - If an enum field is out of range
    /// * `CodecError::Schema` - If the decoded parts fail construction-time validation
    fn decode(bytes: &[u8]) -> Result<Self, CodecError>;
}

fn encode_message<M: Message>(message: &M, kind: &'static str) -> Vec<u8> {
    let bytes = message.encode_to_vec();
    trace!(kind, len = bytes.len(), "Encoded message");
    bytes
}

fn decode_message<M: Message + Default>(bytes: &[u8], kind: &'static str) -> Result<M, CodecError> {
    trace!(kind, len = bytes.len(), "Decoding message");
    Ok(M::decode(bytes)?)
}

impl WireCodec for DataModel {
    fn encode(&self) -> Vec<u8> {
        encode_message(&proto::DataModel::from(self), "DataModel")
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_message::<proto::DataModel>(bytes, "DataModel")?.try_into()
    }
}

impl WireCodec for Description {
    fn encode(&self) -> Vec<u8> {
        encode_message(&proto::Instance::from(self), "Description")
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_message::<proto::Instance>(bytes, "Description")?.try_into()
    }
}

impl WireCodec for Query {
    fn encode(&self) -> Vec<u8> {
        encode_message(&proto::Query::from(self), "Query")
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        decode_message::<proto::Query>(bytes, "Query")?.try_into()
    }
}

// Location

impl From<Location> for proto::Location {
    fn from(location: Location) -> Self {
        Self { latitude: location.latitude(), longitude: location.longitude() }
    }
}

impl From<proto::Location> for Location {
    fn from(location: proto::Location) -> Self {
        Self::new(location.latitude, location.longitude)
    }
}

fn required<T>(field: Option<T>, name: &'static str) -> Result<T, CodecError> {
    field.ok_or(CodecError::MissingField(name))
}

// Values

impl From<&AttributeValue> for proto::Value {
    fn from(value: &AttributeValue) -> Self {
        use proto::value::Kind;

        let kind = match value {
            AttributeValue::String(s) => Kind::String(s.clone()),
            AttributeValue::Integer(i) => Kind::Integer(*i),
            AttributeValue::Float(x) => Kind::Double(*x),
            AttributeValue::Boolean(b) => Kind::Boolean(*b),
            AttributeValue::Location(location) => Kind::Location((*location).into()),
        };
        Self { kind: Some(kind) }
    }
}

impl TryFrom<proto::Value> for AttributeValue {
    type Error = CodecError;

    fn try_from(value: proto::Value) -> Result<Self, Self::Error> {
        use proto::value::Kind;

        Ok(match value.kind.ok_or(CodecError::MissingOneof("Value.kind"))? {
            Kind::String(s) => Self::String(s),
            Kind::Integer(i) => Self::Integer(i),
            Kind::Double(x) => Self::Float(x),
            Kind::Boolean(b) => Self::Boolean(b),
            Kind::Location(location) => Self::Location(location.into()),
        })
    }
}

// Schema

impl From<AttributeType> for proto::AttributeType {
    fn from(attribute_type: AttributeType) -> Self {
        match attribute_type {
            AttributeType::String => Self::String,
            AttributeType::Integer => Self::Int,
            AttributeType::Float => Self::Double,
            AttributeType::Boolean => Self::Bool,
            AttributeType::Location => Self::Location,
        }
    }
}

impl From<proto::AttributeType> for AttributeType {
    fn from(attribute_type: proto::AttributeType) -> Self {
        match attribute_type {
            proto::AttributeType::String => Self::String,
            proto::AttributeType::Int => Self::Integer,
            proto::AttributeType::Double => Self::Float,
            proto::AttributeType::Bool => Self::Boolean,
            proto::AttributeType::Location => Self::Location,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

impl From<&Attribute> for proto::Attribute {
    fn from(attribute: &Attribute) -> Self {
        Self {
            name: attribute.name().to_string(),
            r#type: proto::AttributeType::from(attribute.attribute_type()) as i32,
            required: attribute.is_required(),
            description: non_empty(attribute.description()),
        }
    }
}

impl TryFrom<proto::Attribute> for Attribute {
    type Error = CodecError;

    fn try_from(attribute: proto::Attribute) -> Result<Self, Self::Error> {
        let attribute_type = proto::AttributeType::try_from(attribute.r#type).map_err(|_| {
            CodecError::UnknownEnumValue { field: "Attribute.type", value: attribute.r#type }
        })?;
        Ok(Self::new(attribute.name, attribute_type.into(), attribute.required)
            .with_description(attribute.description.unwrap_or_default()))
    }
}

impl From<&DataModel> for proto::DataModel {
    fn from(model: &DataModel) -> Self {
        Self {
            name: model.name().to_string(),
            attributes: model.attributes().iter().map(proto::Attribute::from).collect(),
            description: non_empty(model.description()),
        }
    }
}

impl TryFrom<proto::DataModel> for DataModel {
    type Error = CodecError;

    fn try_from(model: proto::DataModel) -> Result<Self, Self::Error> {
        let attributes = model
            .attributes
            .into_iter()
            .map(Attribute::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(model.name, attributes)?.with_description(model.description.unwrap_or_default()))
    }
}

impl From<&Description> for proto::Instance {
    fn from(description: &Description) -> Self {
        Self {
            model: Some(description.data_model().into()),
            values: description
                .values()
                .iter()
                .map(|(key, value)| proto::KeyValue { key: key.clone(), value: Some(value.into()) })
                .collect(),
        }
    }
}

impl TryFrom<proto::Instance> for Description {
    type Error = CodecError;

    fn try_from(instance: proto::Instance) -> Result<Self, Self::Error> {
        let model = DataModel::try_from(required(instance.model, "Instance.model")?)?;
        let mut values = BTreeMap::new();
        for entry in instance.values {
            let value = AttributeValue::try_from(required(entry.value, "KeyValue.value")?)?;
            values.insert(entry.key, value);
        }
        Ok(Self::from_parts(values, model)?)
    }
}

// Constraint types

fn relation(operator: proto::RelationOperator, value: AttributeValue) -> proto::constraint::Kind {
    proto::constraint::Kind::Relation(proto::Relation {
        operator: operator as i32,
        value: Some((&value).into()),
    })
}

fn scalar(operator: proto::RelationOperator, value: &ScalarValue) -> proto::constraint::Kind {
    relation(operator, value.clone().into())
}

fn ordered(operator: proto::RelationOperator, value: &OrderedValue) -> proto::constraint::Kind {
    relation(operator, value.clone().into())
}

fn set_members(set: &ValueSet) -> proto::set_values::Members {
    use proto::set_values::{Bools, Doubles, Ints, Locations, Members, Strings};

    match set {
        ValueSet::String(values) => Members::String(Strings { values: values.clone() }),
        ValueSet::Integer(values) => Members::Integer(Ints { values: values.clone() }),
        ValueSet::Float(values) => Members::Double(Doubles { values: values.clone() }),
        ValueSet::Boolean(values) => Members::Boolean(Bools { values: values.clone() }),
        ValueSet::Location(values) => Members::Location(Locations {
            values: values.iter().copied().map(proto::Location::from).collect(),
        }),
    }
}

fn set(operator: proto::SetOperator, values: &ValueSet) -> proto::constraint::Kind {
    proto::constraint::Kind::Set(proto::Set {
        operator: operator as i32,
        values: Some(proto::SetValues { members: Some(set_members(values)) }),
    })
}

impl From<&ConstraintType> for proto::constraint::Kind {
    fn from(constraint_type: &ConstraintType) -> Self {
        use proto::RelationOperator as Rel;
        use proto::range::Pair;

        match constraint_type {
            ConstraintType::Equal(v) => scalar(Rel::Eq, v),
            ConstraintType::NotEqual(v) => scalar(Rel::Noteq, v),
            ConstraintType::LessThan(v) => ordered(Rel::Lt, v),
            ConstraintType::LessThanEq(v) => ordered(Rel::Lteq, v),
            ConstraintType::GreaterThan(v) => ordered(Rel::Gt, v),
            ConstraintType::GreaterThanEq(v) => ordered(Rel::Gteq, v),
            ConstraintType::Within(range) => {
                let pair = match range {
                    Range::String(first, second) => Pair::StringPair(proto::StringPair {
                        first: first.clone(),
                        second: second.clone(),
                    }),
                    Range::Integer(first, second) => {
                        Pair::IntegerPair(proto::IntPair { first: *first, second: *second })
                    }
                    Range::Float(first, second) => {
                        Pair::DoublePair(proto::DoublePair { first: *first, second: *second })
                    }
                };
                Self::Range(proto::Range { pair: Some(pair) })
            }
            ConstraintType::In(values) => set(proto::SetOperator::In, values),
            ConstraintType::NotIn(values) => set(proto::SetOperator::Notin, values),
            ConstraintType::Distance(distance) => Self::Distance(proto::Distance {
                center: Some(distance.center.into()),
                distance: distance.radius,
            }),
        }
    }
}

impl TryFrom<proto::Relation> for ConstraintType {
    type Error = CodecError;

    fn try_from(relation: proto::Relation) -> Result<Self, Self::Error> {
        use proto::RelationOperator as Rel;

        let operator = match Rel::try_from(relation.operator) {
            Ok(Rel::Eq) => ConstraintOperator::Equal,
            Ok(Rel::Noteq) => ConstraintOperator::NotEqual,
            Ok(Rel::Lt) => ConstraintOperator::LessThan,
            Ok(Rel::Lteq) => ConstraintOperator::LessThanEq,
            Ok(Rel::Gt) => ConstraintOperator::GreaterThan,
            Ok(Rel::Gteq) => ConstraintOperator::GreaterThanEq,
            Err(_) => {
                return Err(CodecError::UnknownEnumValue {
                    field: "Relation.operator",
                    value: relation.operator,
                });
            }
        };
        let value = AttributeValue::try_from(required(relation.value, "Relation.value")?)?;
        Ok(Self::new(operator, Operand::Value(value))?)
    }
}

impl TryFrom<proto::Range> for ConstraintType {
    type Error = CodecError;

    fn try_from(range: proto::Range) -> Result<Self, Self::Error> {
        use proto::range::Pair;

        let range = match range.pair.ok_or(CodecError::MissingOneof("Range.pair"))? {
            Pair::StringPair(pair) => Range::String(pair.first, pair.second),
            Pair::IntegerPair(pair) => Range::Integer(pair.first, pair.second),
            Pair::DoublePair(pair) => Range::Float(pair.first, pair.second),
        };
        Ok(Self::Within(range))
    }
}

impl TryFrom<proto::Set> for ConstraintType {
    type Error = CodecError;

    fn try_from(set: proto::Set) -> Result<Self, Self::Error> {
        use proto::set_values::Members;

        let is_in = match proto::SetOperator::try_from(set.operator) {
            Ok(proto::SetOperator::In) => true,
            Ok(proto::SetOperator::Notin) => false,
            Err(_) => {
                return Err(CodecError::UnknownEnumValue { field: "Set.operator", value: set.operator });
            }
        };
        let members = required(set.values, "Set.values")?
            .members
            .ok_or(CodecError::MissingOneof("Set.values"))?;
        let values = match members {
            Members::String(m) => ValueSet::String(m.values),
            Members::Integer(m) => ValueSet::Integer(m.values),
            Members::Double(m) => ValueSet::Float(m.values),
            Members::Boolean(m) => ValueSet::Boolean(m.values),
            Members::Location(m) => {
                ValueSet::Location(m.values.into_iter().map(Location::from).collect())
            }
        };
        Ok(if is_in { Self::In(values) } else { Self::NotIn(values) })
    }
}

impl TryFrom<proto::Distance> for ConstraintType {
    type Error = CodecError;

    fn try_from(distance: proto::Distance) -> Result<Self, Self::Error> {
        let center = required(distance.center, "Distance.center")?;
        Ok(Self::distance(center.into(), distance.distance))
    }
}

impl TryFrom<proto::constraint::Kind> for ConstraintType {
    type Error = CodecError;

    fn try_from(kind: proto::constraint::Kind) -> Result<Self, Self::Error> {
        use proto::constraint::Kind;

        match kind {
            Kind::Relation(relation) => relation.try_into(),
            Kind::Range(range) => range.try_into(),
            Kind::Set(set) => set.try_into(),
            Kind::Distance(distance) => distance.try_into(),
        }
    }
}

// Expressions

impl From<&Constraint> for proto::Constraint {
    fn from(constraint: &Constraint) -> Self {
        Self {
            attribute_name: constraint.attribute_name().to_string(),
            kind: Some(constraint.constraint_type().into()),
        }
    }
}

impl TryFrom<proto::Constraint> for Constraint {
    type Error = CodecError;

    fn try_from(constraint: proto::Constraint) -> Result<Self, Self::Error> {
        let kind = constraint.kind.ok_or(CodecError::MissingOneof("Constraint.kind"))?;
        Ok(Self::new(constraint.attribute_name, kind.try_into()?))
    }
}

impl From<&ConstraintExpr> for proto::ConstraintExpr {
    fn from(expr: &ConstraintExpr) -> Self {
        use proto::constraint_expr::Expression;

        let expression = match expr {
            ConstraintExpr::And(c) => Expression::And(proto::And { expression: encode_children(c) }),
            ConstraintExpr::Or(c) => Expression::Or(proto::Or { expression: encode_children(c) }),
            ConstraintExpr::Not(child) => Expression::Not(proto::Not {
                expression: Some(Box::new(Self::from(child.as_ref()))),
            }),
            ConstraintExpr::Constraint(constraint) => Expression::Constraint(constraint.into()),
        };
        Self { expression: Some(expression) }
    }
}

fn encode_children(children: &[ConstraintExpr]) -> Vec<proto::ConstraintExpr> {
    children.iter().map(proto::ConstraintExpr::from).collect()
}

fn decode_children(children: Vec<proto::ConstraintExpr>) -> Result<Vec<ConstraintExpr>, CodecError> {
    children.into_iter().map(ConstraintExpr::try_from).collect()
}

impl TryFrom<proto::ConstraintExpr> for ConstraintExpr {
    type Error = CodecError;

    fn try_from(expr: proto::ConstraintExpr) -> Result<Self, Self::Error> {
        use proto::constraint_expr::Expression;

        match expr.expression.ok_or(CodecError::MissingOneof("ConstraintExpr.expression"))? {
            Expression::And(and) => Ok(Self::and(decode_children(and.expression)?)?),
            Expression::Or(or) => Ok(Self::or(decode_children(or.expression)?)?),
            Expression::Not(not) => {
                let child = required(not.expression, "Not.expression")?;
                Ok(Self::not(Self::try_from(*child)?))
            }
            Expression::Constraint(constraint) => Ok(Self::Constraint(constraint.try_into()?)),
        }
    }
}

// Query

impl From<&Query> for proto::Query {
    fn from(query: &Query) -> Self {
        Self {
            constraints: encode_children(query.constraints()),
            model: query.model().map(proto::DataModel::from),
        }
    }
}

impl TryFrom<proto::Query> for Query {
    type Error = CodecError;

    fn try_from(query: proto::Query) -> Result<Self, Self::Error> {
        let constraints = decode_children(query.constraints)?;
        let model = query.model.map(DataModel::try_from).transpose()?;
        Ok(Self::new(constraints, model)?)
    }
}
