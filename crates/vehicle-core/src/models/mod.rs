//! Shared data models for the vehicle directory

mod vehicle;

pub use vehicle::*;
