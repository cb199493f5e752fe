//! vehicle-core - Core types for the vehicle directory
//!
//! This crate holds everything that does not touch the network: the
//! [`Vehicle`] record, the closed set of [`VehicleField`]s used for
//! client-side filtering, and the great-circle distance math behind the
//! proximity queries.

pub mod error;
pub mod filter;
pub mod geo;
pub mod models;

pub use error::{VehicleError, VehicleResult};
pub use filter::{Criteria, FieldValue, VehicleField};
pub use geo::{find_nearest, haversine_distance, Coordinates, EARTH_RADIUS_KM};
pub use models::*;
