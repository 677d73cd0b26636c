//! Meridian Search - typed service descriptions and queries for agent discovery.
//!
//! This crate provides the search layer agents use to advertise and find
//! services, including:
//! - Data models of typed attributes and descriptions validated against them
//! - A boolean constraint language with equality, ordering, range, set and
//!   geographic distance operators
//! - A protobuf wire codec for data models, descriptions and queries
//! - An in-memory service directory answering queries
//!
//! # Example
//!
//! ```rust
//! use meridian_search::{
//!     ConstraintExpr, ConstraintType, Description, Location, Query, ServiceDirectory, WireCodec,
//! };
//!
//! let directory = ServiceDirectory::new();
//! let weather = Description::new([
//!     ("city", "London".into()),
//!     ("station", meridian_search::AttributeValue::from(Location::new(51.5, -0.12))),
//! ])?;
//! directory.register_service("weather-agent", weather)?;
//!
//! let nearby = Query::new(
//!     vec![ConstraintExpr::constraint(
//!         "station",
//!         ConstraintType::distance(Location::new(51.48, -0.0), 15.0),
//!     )],
//!     None,
//! )?;
//! let nearby = Query::decode(&nearby.encode())?;
//! assert_eq!(directory.search_services(&nearby)?, vec!["weather-agent"]);
//! # Ok::<(), meridian_search::SearchError>(())
//! ```

pub mod codec;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod proto;
pub mod query;

pub use codec::WireCodec;
pub use config::{Config, DirectoryConfig};
pub use directory::ServiceDirectory;
pub use error::{
    AttributeInconsistency, CodecError, ConfigError, DirectoryError, EvaluationError, Result,
    SchemaError, SearchError,
};
pub use models::{
    Attribute, AttributeType, AttributeValue, DataModel, Description, EARTH_RADIUS_KM, Location,
    generate_data_model, haversine,
};
pub use query::{
    Constraint, ConstraintExpr, ConstraintOperator, ConstraintType, Distance, MAX_EXPRESSION_DEPTH,
    Operand, OrderedValue, Query, Range, ScalarValue, ValueSet,
};
