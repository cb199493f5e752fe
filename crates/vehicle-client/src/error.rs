//! Error types for vehicle client operations

use thiserror::Error;
use vehicle_core::VehicleError;

/// Result type alias for vehicle client operations
pub type Result<T> = std::result::Result<T, VehicleClientError>;

/// Errors that can occur during vehicle client operations
#[derive(Error, Debug)]
pub enum VehicleClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Service answered with a non-success status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Local record check failed (unknown criteria field, missing coordinates)
    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    /// Update requested for a vehicle that has no id
    #[error("Vehicle has no id")]
    MissingId,
}

impl VehicleClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status reported by the service, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
