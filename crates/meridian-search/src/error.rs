//! Error types for Meridian Search.

use thiserror::Error;

use crate::models::AttributeType;

/// A description whose values do not agree with its data model.
///
/// The checks run in the order the variants are declared and the first
/// failure is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeInconsistency {
    /// A required attribute of the data model has no value.
    #[error("Missing required attribute: {0}")]
    MissingRequiredAttribute(String),

    /// A value was supplied for an attribute the data model does not declare.
    #[error("Have extra attribute not in data model: {0}")]
    ExtraAttribute(String),

    /// A value's type differs from the declared attribute type.
    #[error("Attribute {attribute} has incorrect type: expected {expected}, found {found}")]
    IncorrectType {
        /// The offending attribute.
        attribute: String,
        /// The type declared by the data model.
        expected: AttributeType,
        /// The type of the supplied value.
        found: AttributeType,
    },
}

/// Construction-time errors for schemas, constraints and queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two attributes of a data model share a name.
    #[error("Invalid input value for type 'DataModel': duplicated attribute name '{0}'")]
    DuplicateAttribute(String),

    /// A description is inconsistent with its data model.
    #[error(transparent)]
    AttributeInconsistency(#[from] AttributeInconsistency),

    /// The operand does not have the shape required by the operator.
    #[error("ConstraintType initialization inconsistent: {0}")]
    InvalidConstraintType(String),

    /// An unrecognized constraint operator symbol.
    #[error("Unknown constraint operator: {0}")]
    UnknownOperator(String),

    /// An `And`/`Or` expression with fewer than two sub-expressions.
    #[error("Invalid input value for type '{kind}': number of subexpression must be at least 2, got {found}")]
    TooFewSubexpressions {
        /// `And` or `Or`.
        kind: &'static str,
        /// Number of sub-expressions supplied.
        found: usize,
    },

    /// An expression tree nests deeper than the wire format can carry.
    #[error("Invalid input value for type 'ConstraintExpr': nesting depth {found} exceeds the maximum of {max}")]
    ExpressionTooDeep {
        /// Deepest nesting accepted.
        max: usize,
        /// Nesting depth of the rejected tree.
        found: usize,
    },

    /// The query references attributes its data model cannot satisfy.
    #[error("Invalid input value for type 'Query': the query is not valid for the given data model '{0}'")]
    InvalidQuery(String),
}

/// Raised when a constraint is evaluated against a value it cannot compare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// The value type is incompatible with the operator's operand.
    #[error("Cannot evaluate '{operator}' over {operand} against a {value} value")]
    TypeMismatch {
        /// Operator symbol.
        operator: String,
        /// Operand type of the constraint.
        operand: AttributeType,
        /// Type of the value being checked.
        value: AttributeType,
    },
}

/// Errors raised while decoding wire messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The bytes are not a well-formed message.
    #[error("Malformed message: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A required embedded message is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A oneof carries no recognized case.
    #[error("Unrecognized or empty oneof: {0}")]
    MissingOneof(&'static str),

    /// An enum field carries a value outside its declared range.
    #[error("Unknown value {value} for enum field {field}")]
    UnknownEnumValue {
        /// The enum field.
        field: &'static str,
        /// The raw wire value.
        value: i32,
    },

    /// The decoded parts violate a construction-time invariant.
    #[error("Decoded value is invalid: {0}")]
    Schema(#[from] SchemaError),
}

/// Errors from the in-memory service directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// No entry under the given key.
    #[error("not registered: {0}")]
    NotFound(String),

    /// The same description is already registered under the key.
    #[error("already registered: {0}")]
    AlreadyRegistered(String),

    /// Lock poisoned.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Errors from loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Crate-level error type.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Schema errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Evaluation errors
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Codec errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Directory errors
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Meridian Search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_inconsistency_lifts_into_schema_error() {
        let err: SchemaError =
            AttributeInconsistency::MissingRequiredAttribute("year".to_string()).into();
        assert!(matches!(
            err,
            SchemaError::AttributeInconsistency(AttributeInconsistency::MissingRequiredAttribute(_))
        ));
        assert_eq!(err.to_string(), "Missing required attribute: year");
    }

    #[test]
    fn test_incorrect_type_display() {
        let err = AttributeInconsistency::IncorrectType {
            attribute: "year".to_string(),
            expected: AttributeType::Integer,
            found: AttributeType::String,
        };
        let msg = err.to_string();
        assert!(msg.contains("year"));
        assert!(msg.contains("expected int"));
        assert!(msg.contains("found str"));
    }

    #[test]
    fn test_search_error_from_codec() {
        let err: SearchError = CodecError::MissingField("model").into();
        match err {
            SearchError::Codec(CodecError::MissingField(field)) => assert_eq!(field, "model"),
            _ => panic!("Expected Codec error variant"),
        }
    }

    #[test]
    fn test_search_error_from_directory() {
        let err: SearchError = DirectoryError::NotFound("agent-1".to_string()).into();
        let msg = err.to_string();
        assert!(msg.contains("Directory error"));
        assert!(msg.contains("agent-1"));
    }

    #[test]
    fn test_codec_error_wraps_schema_error() {
        let err: CodecError = SchemaError::DuplicateAttribute("a".to_string()).into();
        assert!(matches!(err, CodecError::Schema(SchemaError::DuplicateAttribute(_))));
    }

    #[test]
    fn test_config_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SearchError = ConfigError::from(io_err).into();
        assert!(matches!(err, SearchError::Config(ConfigError::Io(_))));
    }
}
