//! Coordinates and device location samples.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point on the earth's surface in decimal degrees.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Coordinate;
///
/// let office = Coordinate::new(-7.779071, 110.416098);
/// assert!(office.is_valid());
/// assert!(!Coordinate::new(91.0, 0.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, -90 to 90.
    pub latitude: f64,
    /// Longitude in degrees, -180 to 180.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Why the device could not produce a position.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationError {
    /// The user refused location access.
    #[error("location permission denied")]
    PermissionDenied,
    /// No position arrived within the request timeout.
    #[error("location request timed out")]
    Timeout,
    /// The device has no location capability.
    #[error("location is not supported on this device")]
    Unsupported,
    /// Any other provider failure.
    #[error("location unavailable: {message}")]
    Unavailable {
        /// The provider's description of the failure.
        message: String,
    },
}

/// The latest answer from the location provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationSample {
    /// No sample has been received yet.
    #[default]
    Pending,
    /// The provider failed.
    Unavailable(LocationError),
    /// A position fix.
    Fix(Coordinate),
}

impl LocationSample {
    /// Returns the coordinate if this sample is a fix.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            LocationSample::Fix(c) => Some(*c),
            _ => None,
        }
    }
}

impl From<Result<Coordinate, LocationError>> for LocationSample {
    fn from(result: Result<Coordinate, LocationError>) -> Self {
        match result {
            Ok(c) => LocationSample::Fix(c),
            Err(e) => LocationSample::Unavailable(e),
        }
    }
}
