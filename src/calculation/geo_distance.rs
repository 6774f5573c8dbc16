//! Great-circle distance and geofence checks.
//!
//! Distances use the haversine formula on a spherical earth. The error
//! against the ellipsoid is well under a meter at geofence scales.

use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRules, Coordinate};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Returns the great-circle distance between two coordinates in meters.
///
/// The result is never negative, is symmetric in its arguments and is zero
/// for identical points.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::distance_meters;
/// use attendance_engine::models::Coordinate;
///
/// let office = Coordinate::new(-7.779071, 110.416098);
/// // roughly 100 m due north
/// let north = Coordinate::new(-7.779071 + 0.000_899_3, 110.416098);
///
/// let d = distance_meters(office, north);
/// assert!((d - 100.0).abs() < 1.0);
/// assert_eq!(distance_meters(office, office), 0.0);
/// ```
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push h slightly outside [0, 1]
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Outcome of checking a location against the office geofence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceCheck {
    /// Distance to the office in meters.
    pub distance_meters: f64,
    /// Allowed radius in meters.
    pub radius_meters: f64,
    /// True if the distance does not exceed the radius.
    pub inside: bool,
}

/// Checks a position against the rules' geofence.
///
/// A point exactly on the boundary is inside.
pub fn check_geofence(position: Coordinate, rules: &AttendanceRules) -> GeofenceCheck {
    let distance = distance_meters(position, rules.office_location);
    GeofenceCheck {
        distance_meters: distance,
        radius_meters: rules.radius_meters,
        inside: distance <= rules.radius_meters,
    }
}
