//! Error types for vehicle record operations

use thiserror::Error;

/// Result type for vehicle record operations
pub type VehicleResult<T> = Result<T, VehicleError>;

/// Errors raised while inspecting vehicle records locally
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VehicleError {
    /// Criteria key is not one of the known vehicle fields
    #[error("Unknown vehicle field: {0}")]
    UnknownField(String),

    /// Distance requested for a vehicle without latitude or longitude
    #[error("Vehicle {} has no coordinates", display_id(.id))]
    MissingCoordinates { id: Option<u64> },
}

fn display_id(id: &Option<u64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "<unsaved>".to_string(),
    }
}

impl VehicleError {
    /// Create a missing-coordinates error for the given vehicle id
    pub fn missing_coordinates(id: Option<u64>) -> Self {
        Self::MissingCoordinates { id }
    }
}
