//! Vehicle record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VehicleError, VehicleResult};
use crate::geo::Coordinates;

/// One inventory item as exchanged with the vehicle service.
///
/// Every attribute is optional: a vehicle built locally for creation has no
/// `id` yet, and the service may omit any other key. Nothing is validated
/// here; bad values are rejected by the service or by the arithmetic that
/// consumes them.
///
/// `id` is left out of the serialized object when absent, which is what the
/// creation payload requires. All other absent attributes serialize as
/// `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier assigned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Make, e.g. "Toyota"
    #[serde(default)]
    pub name: Option<String>,
    /// Model, e.g. "Camry"
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Vehicle {
    /// Create a vehicle with every attribute absent
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set both latitude and longitude (degrees)
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Copy of this vehicle with `id` cleared, as sent on creation
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// Position of the vehicle, if both coordinates are present
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Position of the vehicle, failing when either coordinate is absent
    pub fn require_coordinates(&self) -> VehicleResult<Coordinates> {
        self.coordinates()
            .ok_or_else(|| VehicleError::missing_coordinates(self.id))
    }

    /// Great-circle distance to another vehicle in kilometers
    pub fn distance_to(&self, other: &Vehicle) -> VehicleResult<f64> {
        let from = self.require_coordinates()?;
        let to = other.require_coordinates()?;
        Ok(from.distance_to(&to))
    }
}

/// Diagnostic rendering, not a serialization format
impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Vehicle: {} {} {} {} {}>",
            or_none(&self.name),
            or_none(&self.model),
            or_none(&self.year),
            or_none(&self.color),
            or_none(&self.price),
        )
    }
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "None".to_string())
}
