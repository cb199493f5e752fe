//! Vehicle Client Library
//!
//! Provides a typed HTTP client for a remote vehicle inventory service,
//! plus client-side filtering and proximity queries over its records.
//!
//! # Example
//!
//! ```rust,no_run
//! use vehicle_client::{Vehicle, VehicleClient};
//!
//! #[tokio::main]
//! async fn main() -> vehicle_client::Result<()> {
//!     let client = VehicleClient::new("https://test.tspb.su/test-task")?;
//!
//!     // Full collection, in service order
//!     let vehicles = client.list_vehicles().await?;
//!
//!     // Client-side equality filter
//!     let toyotas = client.filter_vehicles_by([("name", "Toyota")]).await?;
//!
//!     // Create; the service assigns the id
//!     let created = client
//!         .create_vehicle(&Vehicle::new().with_name("Toyota").with_model("Camry"))
//!         .await?;
//!
//!     // Proximity
//!     let km = client.distance_between(1, 2).await?;
//!     let nearest = client.nearest_to(1).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides an in-process vehicle service:
//!
//! ```rust,ignore
//! use vehicle_client::testing::MockVehicleService;
//!
//! let service = MockVehicleService::with_vehicles(fixtures);
//! let server = service.start().await?;
//! let vehicles = server.client.list_vehicles().await?;
//! ```

mod client;
mod error;
pub mod testing;

pub use client::VehicleClient;
pub use error::{Result, VehicleClientError};

// Re-export core types for convenience
pub use vehicle_core::{
    haversine_distance, Coordinates, Criteria, FieldValue, Vehicle, VehicleError, VehicleField,
};
