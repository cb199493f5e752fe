//! Great-circle distance and nearest-vehicle search

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::VehicleResult;
use crate::models::Vehicle;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to `other` in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Great-circle distance in kilometers between two points given in degrees.
///
/// ```
/// use vehicle_core::haversine_distance;
///
/// let km = haversine_distance(55.7558, 37.6176, 59.9311, 30.3609);
/// assert!((km - 635.0).abs() < 5.0);
/// ```
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();

    // Rounding can push `a` past 1.0 near antipodes
    let a = ((d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Find the candidate closest to `origin`, skipping any whose id is `exclude_id`.
///
/// Candidates are scanned in order and a later candidate replaces the
/// current best when its distance is less than *or equal to* the minimum,
/// so among equidistant candidates the last one wins. Returns `None` when
/// no candidate remains after exclusion. Fails on the first vehicle (origin
/// included) that lacks coordinates.
pub fn find_nearest<I>(
    origin: &Vehicle,
    exclude_id: u64,
    candidates: I,
) -> VehicleResult<Option<Vehicle>>
where
    I: IntoIterator<Item = Vehicle>,
{
    let from = origin.require_coordinates()?;
    let mut min_distance = f64::INFINITY;
    let mut nearest = None;

    for candidate in candidates {
        if candidate.id == Some(exclude_id) {
            continue;
        }
        let distance = from.distance_to(&candidate.require_coordinates()?);
        trace!(id = ?candidate.id, distance, "nearest candidate");
        if distance <= min_distance {
            min_distance = distance;
            nearest = Some(candidate);
        }
    }

    Ok(nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VehicleError;
    use pretty_assertions::assert_eq;
    use std::f64::consts::PI;

    fn at(id: u64, latitude: f64, longitude: f64) -> Vehicle {
        Vehicle::new().with_id(id).with_location(latitude, longitude)
    }

    #[test]
    fn test_identical_points_are_zero() {
        assert_eq!(haversine_distance(55.7558, 37.6176, 55.7558, 37.6176), 0.0);
        assert_eq!(haversine_distance(-33.9, 151.2, -33.9, 151.2), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let points = [
            (55.7558, 37.6176),
            (59.9311, 30.3609),
            (-33.8688, 151.2093),
            (40.7128, -74.0060),
            (0.0, 0.0),
        ];
        for &(lat1, lon1) in &points {
            for &(lat2, lon2) in &points {
                let ab = haversine_distance(lat1, lon1, lat2, lon2);
                let ba = haversine_distance(lat2, lon2, lat1, lon1);
                assert!((ab - ba).abs() < 1e-9, "{} != {}", ab, ba);
            }
        }
    }

    #[test]
    fn test_bounded_by_half_circumference() {
        let max = PI * EARTH_RADIUS_KM;
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                let d = haversine_distance(lat, lon, -lat / 2.0, lon + 135.0);
                assert!(d >= 0.0);
                assert!(d <= max + 1e-6, "{} exceeds {}", d, max);
                lon += 45.0;
            }
            lat += 30.0;
        }
    }

    #[test]
    fn test_near_antipodes_stay_bounded() {
        let max = PI * EARTH_RADIUS_KM;
        let mut lat = -89.917;
        while lat < 90.0 {
            let mut lon = -179.679;
            while lon < 180.0 {
                let d = haversine_distance(lat, lon, -lat, lon + 180.0);
                assert!(d >= 0.0 && d <= max, "({}, {}) gave {}", lat, lon, d);
                lon += 0.713;
            }
            lat += 0.577;
        }
    }

    #[test]
    fn test_nearest_with_antipodal_candidate() {
        let origin = at(1, -70.877, -179.679);
        let candidates = vec![at(2, 70.877, 0.321)];

        let nearest = find_nearest(&origin, 1, candidates).unwrap().unwrap();
        assert_eq!(nearest.id, Some(2));
    }

    #[test]
    fn test_antipodes_reach_half_circumference() {
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_moscow_to_saint_petersburg() {
        let moscow = Coordinates::new(55.7558, 37.6176);
        let spb = Coordinates::new(59.9311, 30.3609);
        let km = moscow.distance_to(&spb);
        assert!((km - 635.0).abs() < 5.0, "got {}", km);
    }

    #[test]
    fn test_find_nearest_picks_minimum() {
        let origin = at(1, 55.7558, 37.6176);
        let candidates = vec![
            origin.clone(),
            at(2, 59.9311, 30.3609),
            at(3, 55.80, 37.60),
            at(4, 43.1155, 131.8855),
        ];

        let nearest = find_nearest(&origin, 1, candidates).unwrap().unwrap();
        assert_eq!(nearest.id, Some(3));
    }

    #[test]
    fn test_find_nearest_ties_keep_last() {
        let origin = at(1, 0.0, 0.0);
        let candidates = vec![
            at(2, 1.0, 0.0),
            at(3, 0.0, 1.0),
            origin.clone(),
            at(4, 1.0, 0.0),
        ];

        let nearest = find_nearest(&origin, 1, candidates).unwrap().unwrap();
        assert_eq!(nearest.id, Some(4));
    }

    #[test]
    fn test_find_nearest_only_target() {
        let origin = at(1, 10.0, 10.0);
        let nearest = find_nearest(&origin, 1, vec![origin.clone()]).unwrap();
        assert!(nearest.is_none());

        let nearest = find_nearest(&origin, 1, Vec::new()).unwrap();
        assert!(nearest.is_none());
    }

    #[test]
    fn test_find_nearest_missing_coordinates() {
        let origin = at(1, 10.0, 10.0);
        let result = find_nearest(&origin, 1, vec![at(2, 1.0, 1.0), Vehicle::new().with_id(3)]);
        assert_eq!(
            result,
            Err(VehicleError::MissingCoordinates { id: Some(3) })
        );

        let result = find_nearest(&Vehicle::new().with_id(1), 1, vec![at(2, 1.0, 1.0)]);
        assert_eq!(
            result,
            Err(VehicleError::MissingCoordinates { id: Some(1) })
        );
    }
}
