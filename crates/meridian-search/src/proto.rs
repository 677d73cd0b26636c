//! Protobuf messages for the search wire format.
//!
//! The schema lives in `proto/search.proto`. These messages mirror it with
//! `prost` derives, so the crate builds without `protoc`. Conversions to and
//! from the model types live in [`crate::codec`].

#![allow(clippy::derive_partial_eq_without_eq)]

/// A geographic point.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Location {
    #[prost(double, tag = "1")]
    pub latitude: f64,
    #[prost(double, tag = "2")]
    pub longitude: f64,
}

/// A tagged scalar value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {
    #[prost(oneof = "value::Kind", tags = "1, 2, 3, 4, 5")]
    pub kind: ::core::option::Option<value::Kind>,
}

/// Nested types for [`Value`].
pub mod value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(string, tag = "1")]
        String(::prost::alloc::string::String),
        #[prost(double, tag = "2")]
        Double(f64),
        #[prost(bool, tag = "3")]
        Boolean(bool),
        #[prost(int64, tag = "4")]
        Integer(i64),
        #[prost(message, tag = "5")]
        Location(super::Location),
    }
}

/// One entry of a description.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyValue {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub value: ::core::option::Option<Value>,
}

/// Attribute value types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AttributeType {
    Double = 0,
    Int = 1,
    Bool = 2,
    String = 3,
    Location = 4,
}

/// A schema attribute.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Attribute {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "AttributeType", tag = "2")]
    pub r#type: i32,
    #[prost(bool, tag = "3")]
    pub required: bool,
    #[prost(string, optional, tag = "4")]
    pub description: ::core::option::Option<::prost::alloc::string::String>,
}

/// A named schema.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataModel {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub attributes: ::prost::alloc::vec::Vec<Attribute>,
    #[prost(string, optional, tag = "3")]
    pub description: ::core::option::Option<::prost::alloc::string::String>,
}

/// A description: its data model and values.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Instance {
    #[prost(message, optional, tag = "1")]
    pub model: ::core::option::Option<DataModel>,
    #[prost(message, repeated, tag = "2")]
    pub values: ::prost::alloc::vec::Vec<KeyValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StringPair {
    #[prost(string, tag = "1")]
    pub first: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub second: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct IntPair {
    #[prost(int64, tag = "1")]
    pub first: i64,
    #[prost(int64, tag = "2")]
    pub second: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DoublePair {
    #[prost(double, tag = "1")]
    pub first: f64,
    #[prost(double, tag = "2")]
    pub second: f64,
}

/// Inclusive range constraint. Tag 4 is reserved: ranges over locations
/// are not valid constraints.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Range {
    #[prost(oneof = "range::Pair", tags = "1, 2, 3")]
    pub pair: ::core::option::Option<range::Pair>,
}

/// Nested types for [`Range`].
pub mod range {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Pair {
        #[prost(message, tag = "1")]
        StringPair(super::StringPair),
        #[prost(message, tag = "2")]
        IntegerPair(super::IntPair),
        #[prost(message, tag = "3")]
        DoublePair(super::DoublePair),
    }
}

/// Comparison against a single value.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Relation {
    #[prost(enumeration = "RelationOperator", tag = "1")]
    pub operator: i32,
    #[prost(message, optional, tag = "2")]
    pub value: ::core::option::Option<Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RelationOperator {
    Eq = 0,
    Lt = 1,
    Lteq = 2,
    Gt = 3,
    Gteq = 4,
    Noteq = 5,
}

/// Set membership constraint.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Set {
    #[prost(enumeration = "SetOperator", tag = "1")]
    pub operator: i32,
    #[prost(message, optional, tag = "2")]
    pub values: ::core::option::Option<SetValues>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SetOperator {
    In = 0,
    Notin = 1,
}

/// Typed members of a set. The case is kept even when empty.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetValues {
    #[prost(oneof = "set_values::Members", tags = "1, 2, 3, 4, 5")]
    pub members: ::core::option::Option<set_values::Members>,
}

/// Nested types for [`SetValues`].
pub mod set_values {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Strings {
        #[prost(string, repeated, tag = "1")]
        pub values: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Doubles {
        #[prost(double, repeated, tag = "1")]
        pub values: ::prost::alloc::vec::Vec<f64>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Bools {
        #[prost(bool, repeated, tag = "1")]
        pub values: ::prost::alloc::vec::Vec<bool>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Ints {
        #[prost(int64, repeated, tag = "1")]
        pub values: ::prost::alloc::vec::Vec<i64>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Locations {
        #[prost(message, repeated, tag = "1")]
        pub values: ::prost::alloc::vec::Vec<super::Location>,
    }

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Members {
        #[prost(message, tag = "1")]
        String(Strings),
        #[prost(message, tag = "2")]
        Double(Doubles),
        #[prost(message, tag = "3")]
        Boolean(Bools),
        #[prost(message, tag = "4")]
        Integer(Ints),
        #[prost(message, tag = "5")]
        Location(Locations),
    }
}

/// Great-circle distance constraint.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Distance {
    #[prost(message, optional, tag = "1")]
    pub center: ::core::option::Option<Location>,
    #[prost(double, tag = "2")]
    pub distance: f64,
}

/// A leaf constraint.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Constraint {
    #[prost(string, tag = "1")]
    pub attribute_name: ::prost::alloc::string::String,
    #[prost(oneof = "constraint::Kind", tags = "2, 3, 4, 5")]
    pub kind: ::core::option::Option<constraint::Kind>,
}

/// Nested types for [`Constraint`].
pub mod constraint {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "2")]
        Set(super::Set),
        #[prost(message, tag = "3")]
        Range(super::Range),
        #[prost(message, tag = "4")]
        Relation(super::Relation),
        #[prost(message, tag = "5")]
        Distance(super::Distance),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct And {
    #[prost(message, repeated, tag = "1")]
    pub expression: ::prost::alloc::vec::Vec<ConstraintExpr>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Or {
    #[prost(message, repeated, tag = "1")]
    pub expression: ::prost::alloc::vec::Vec<ConstraintExpr>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Not {
    #[prost(message, optional, boxed, tag = "1")]
    pub expression: ::core::option::Option<::prost::alloc::boxed::Box<ConstraintExpr>>,
}

/// A node of a constraint expression tree.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConstraintExpr {
    #[prost(oneof = "constraint_expr::Expression", tags = "1, 2, 3, 4")]
    pub expression: ::core::option::Option<constraint_expr::Expression>,
}

/// Nested types for [`ConstraintExpr`].
pub mod constraint_expr {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Expression {
        #[prost(message, tag = "1")]
        Or(super::Or),
        #[prost(message, tag = "2")]
        And(super::And),
        #[prost(message, tag = "3")]
        Not(super::Not),
        #[prost(message, tag = "4")]
        Constraint(super::Constraint),
    }
}

/// A query: top-level constraints and an optional data model.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(message, repeated, tag = "1")]
    pub constraints: ::prost::alloc::vec::Vec<ConstraintExpr>,
    #[prost(message, optional, tag = "2")]
    pub model: ::core::option::Option<DataModel>,
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../proto/search.proto");

    #[test]
    fn test_schema_declares_every_message() {
        for name in [
            "Location",
            "Value",
            "KeyValue",
            "Attribute",
            "DataModel",
            "Instance",
            "StringPair",
            "IntPair",
            "DoublePair",
            "Range",
            "Relation",
            "SetValues",
            "Strings",
            "Doubles",
            "Bools",
            "Ints",
            "Locations",
            "Set",
            "Distance",
            "Constraint",
            "And",
            "Or",
            "Not",
            "ConstraintExpr",
            "Query",
        ] {
            assert!(SCHEMA.contains(&format!("message {name} {{")), "missing message {name}");
        }
        for name in ["AttributeType", "RelationOperator", "SetOperator"] {
            assert!(SCHEMA.contains(&format!("enum {name} {{")), "missing enum {name}");
        }
    }

    #[test]
    fn test_range_location_tag_is_reserved() {
        assert!(SCHEMA.contains("reserved 4;"));
        assert!(!SCHEMA.contains("LocationPair"));
    }
}
