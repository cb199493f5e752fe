//! Field lookup and equality criteria for client-side filtering
//!
//! Filtering keys on a closed set of field names. Each [`VehicleField`]
//! maps to a typed accessor on [`Vehicle`]; any other name is rejected with
//! [`VehicleError::UnknownField`].

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{VehicleError, VehicleResult};
use crate::models::Vehicle;

/// The eight attributes of a vehicle record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    Id,
    Name,
    Model,
    Year,
    Color,
    Price,
    Latitude,
    Longitude,
}

impl VehicleField {
    /// All fields in wire order
    pub const ALL: [VehicleField; 8] = [
        VehicleField::Id,
        VehicleField::Name,
        VehicleField::Model,
        VehicleField::Year,
        VehicleField::Color,
        VehicleField::Price,
        VehicleField::Latitude,
        VehicleField::Longitude,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleField::Id => "id",
            VehicleField::Name => "name",
            VehicleField::Model => "model",
            VehicleField::Year => "year",
            VehicleField::Color => "color",
            VehicleField::Price => "price",
            VehicleField::Latitude => "latitude",
            VehicleField::Longitude => "longitude",
        }
    }

    /// Read this field from a vehicle
    pub fn get(&self, vehicle: &Vehicle) -> FieldValue {
        match self {
            VehicleField::Id => vehicle.id.into(),
            VehicleField::Name => vehicle.name.clone().into(),
            VehicleField::Model => vehicle.model.clone().into(),
            VehicleField::Year => vehicle.year.map(i64::from).into(),
            VehicleField::Color => vehicle.color.clone().into(),
            VehicleField::Price => vehicle.price.into(),
            VehicleField::Latitude => vehicle.latitude.into(),
            VehicleField::Longitude => vehicle.longitude.into(),
        }
    }
}

impl FromStr for VehicleField {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| VehicleError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for VehicleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value as seen by the filter
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Attribute absent
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    /// JSON shape no vehicle attribute can hold (bool, array, object)
    Other(Value),
}

impl FieldValue {
    /// Strict equality used by [`Criteria`].
    ///
    /// Text never equals a number. Integers and floats compare by numeric
    /// value, so a price criterion of `21000` matches a price of `21000.0`.
    pub fn matches(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Float(b))
            | (FieldValue::Float(b), FieldValue::Integer(a)) => (*a as f64) == *b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n
                    .as_f64()
                    .map(FieldValue::Float)
                    .unwrap_or(FieldValue::Other(Value::Number(n))),
            },
            other => FieldValue::Other(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => FieldValue::Integer(i),
            Err(_) => FieldValue::Float(value as f64),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A conjunction of `field == value` terms.
///
/// An empty criteria matches every vehicle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    terms: Vec<(VehicleField, FieldValue)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required `field == value` term
    pub fn with(mut self, field: VehicleField, value: impl Into<FieldValue>) -> Self {
        self.terms.push((field, value.into()));
        self
    }

    /// Build criteria from `(field name, value)` pairs.
    ///
    /// Fails on the first name that is not a vehicle field.
    pub fn from_pairs<I, K, V>(pairs: I) -> VehicleResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        pairs
            .into_iter()
            .try_fold(Criteria::new(), |criteria, (key, value)| -> VehicleResult<Criteria> {
                let field = key.as_ref().parse::<VehicleField>()?;
                Ok(criteria.with(field, value))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[(VehicleField, FieldValue)] {
        &self.terms
    }

    /// Whether every term holds for `vehicle`
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.terms
            .iter()
            .all(|(field, expected)| field.get(vehicle).matches(expected))
    }

    /// Keep the matching vehicles, preserving their order
    pub fn apply(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn fleet() -> Vec<Vehicle> {
        vec![
            Vehicle::new()
                .with_id(1)
                .with_name("Toyota")
                .with_model("Camry")
                .with_year(2021)
                .with_price(21000.0),
            Vehicle::new()
                .with_id(2)
                .with_name("Lada")
                .with_model("Vesta")
                .with_year(2019)
                .with_color("white"),
            Vehicle::new()
                .with_id(3)
                .with_name("Toyota")
                .with_model("Corolla")
                .with_year(2019),
        ]
    }

    fn ids(vehicles: &[Vehicle]) -> Vec<u64> {
        vehicles.iter().filter_map(|v| v.id).collect()
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in VehicleField::ALL {
            assert_eq!(field.as_str().parse::<VehicleField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert_eq!(
            "mileage".parse::<VehicleField>(),
            Err(VehicleError::UnknownField("mileage".to_string()))
        );
        // Names are case-sensitive
        assert!("Name".parse::<VehicleField>().is_err());
    }

    #[test]
    fn test_empty_criteria_keeps_all() {
        let criteria = Criteria::new();
        assert!(criteria.is_empty());
        assert_eq!(criteria.apply(fleet()), fleet());
    }

    #[test]
    fn test_filter_by_name_preserves_order() {
        let criteria = Criteria::new().with(VehicleField::Name, "Toyota");
        assert_eq!(ids(&criteria.apply(fleet())), vec![1, 3]);
    }

    #[test]
    fn test_all_terms_must_hold() {
        let criteria = Criteria::new()
            .with(VehicleField::Name, "Toyota")
            .with(VehicleField::Year, 2019_i64);
        assert_eq!(ids(&criteria.apply(fleet())), vec![3]);
    }

    #[test]
    fn test_no_string_number_coercion() {
        let criteria = Criteria::new().with(VehicleField::Year, "2019");
        assert!(criteria.apply(fleet()).is_empty());
    }

    #[test]
    fn test_integer_matches_float_price() {
        let criteria = Criteria::new().with(VehicleField::Price, 21000_i64);
        assert_eq!(ids(&criteria.apply(fleet())), vec![1]);
    }

    #[test]
    fn test_null_matches_absent() {
        let criteria = Criteria::new().with(VehicleField::Color, Value::Null);
        assert_eq!(ids(&criteria.apply(fleet())), vec![1, 3]);
    }

    #[test]
    fn test_from_pairs() {
        let mut params = HashMap::new();
        params.insert("name".to_string(), json!("Lada"));
        let criteria = Criteria::from_pairs(params).unwrap();
        assert_eq!(criteria.len(), 1);
        assert_eq!(ids(&criteria.apply(fleet())), vec![2]);

        let result = Criteria::from_pairs([("name", json!("Lada")), ("wheels", json!(4))]);
        assert_eq!(result, Err(VehicleError::UnknownField("wheels".to_string())));
    }

    #[test]
    fn test_json_values_convert() {
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Null);
        assert_eq!(FieldValue::from(json!(7)), FieldValue::Integer(7));
        assert_eq!(FieldValue::from(json!(1.5)), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from(json!("x")), FieldValue::Text("x".into()));
        assert_eq!(FieldValue::from(json!(true)), FieldValue::Other(json!(true)));
        assert!(!FieldValue::from(json!(true)).matches(&FieldValue::from(json!(true))));
    }
}
