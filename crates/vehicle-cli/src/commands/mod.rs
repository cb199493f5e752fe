//! Command implementations for vehicle-cli

pub mod proximity;
pub mod read;
pub mod write;

pub use proximity::{distance, nearest};
pub use read::{filter, get, list};
pub use write::{create, delete, update, VehicleArgs};
