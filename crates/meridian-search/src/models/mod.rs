//! Data models for Meridian Search.
//!
//! This module contains the schema side of the search language: locations,
//! attribute types and values, attributes, data models and the descriptions
//! that agents advertise against them.

pub mod attribute;
pub mod data_model;
pub mod description;
pub mod location;
pub mod value;

pub use attribute::Attribute;
pub use data_model::{DataModel, generate_data_model};
pub use description::Description;
pub use location::{EARTH_RADIUS_KM, Location, haversine};
pub use value::{AttributeType, AttributeValue};
