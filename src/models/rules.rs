//! Attendance rules: check-in/out buffers and the office geofence.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::location::Coordinate;
use super::serde_helpers::numeric_value;

/// Minutes before shift start at which check-in opens, when not configured.
pub const DEFAULT_BUFFER_BEFORE_START_MINUTES: u32 = 30;

/// Minutes after shift end at which check-in/out closes, when not configured.
pub const DEFAULT_BUFFER_AFTER_END_MINUTES: u32 = 30;

/// Office location used when the backend has none.
pub const DEFAULT_OFFICE_LOCATION: Coordinate = Coordinate::new(-7.779071, 110.416098);

/// Geofence radius used when the backend has none.
pub const DEFAULT_RADIUS_METERS: f64 = 50.0;

/// The attendance rules in force for a session.
///
/// Rules are owned by the backend and replaced wholesale on refresh.
/// Buffers are unsigned so they can never be negative; the radius is kept
/// strictly positive by [`AttendanceRules::from_settings`].
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceRules;
///
/// let rules = AttendanceRules::default();
/// assert_eq!(rules.buffer_before_start_minutes, 30);
/// assert!(rules.requires_geofence);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRules {
    /// Minutes before shift start that check-in opens.
    #[serde(rename = "buffer_before_start")]
    pub buffer_before_start_minutes: u32,
    /// Minutes after shift end that check-in and check-out close.
    #[serde(rename = "buffer_after_end")]
    pub buffer_after_end_minutes: u32,
    /// Centre of the geofence.
    #[serde(flatten)]
    pub office_location: Coordinate,
    /// Geofence radius in meters.
    #[serde(rename = "radius_m")]
    pub radius_meters: f64,
    /// Whether a location inside the geofence is required to act.
    pub requires_geofence: bool,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            buffer_before_start_minutes: DEFAULT_BUFFER_BEFORE_START_MINUTES,
            buffer_after_end_minutes: DEFAULT_BUFFER_AFTER_END_MINUTES,
            office_location: DEFAULT_OFFICE_LOCATION,
            radius_meters: DEFAULT_RADIUS_METERS,
            requires_geofence: true,
        }
    }
}

/// The raw settings payload as sent by the backend.
///
/// Every field is kept as an untyped JSON value so that missing or
/// malformed entries can fall back to defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPayload {
    /// Minutes before shift start.
    #[serde(default)]
    pub buffer_before_start: Option<Value>,
    /// Minutes after shift end.
    #[serde(default)]
    pub buffer_after_end: Option<Value>,
    /// Geofence centre latitude.
    #[serde(default)]
    pub latitude: Option<Value>,
    /// Geofence centre longitude.
    #[serde(default)]
    pub longitude: Option<Value>,
    /// Geofence radius in meters.
    #[serde(default)]
    pub radius_m: Option<Value>,
    /// Explicit geofence enforcement flag.
    #[serde(default)]
    pub requires_geofence: Option<Value>,
}

impl AttendanceRules {
    /// Builds rules from a backend settings payload.
    ///
    /// Absent or non-numeric fields take the value from `defaults`. Negative
    /// buffers clamp to zero; a non-positive or out-of-range coordinate or
    /// radius falls back to the default. When the payload has no
    /// `requires_geofence` flag, enforcement follows whether the payload's
    /// radius is positive, like the backend does.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceRules, SettingsPayload};
    /// use serde_json::json;
    ///
    /// let payload: SettingsPayload = serde_json::from_value(json!({
    ///     "buffer_before_start": "45",
    ///     "buffer_after_end": "oops",
    ///     "radius_m": 80
    /// })).unwrap();
    ///
    /// let rules = AttendanceRules::from_settings(&payload, &AttendanceRules::default());
    /// assert_eq!(rules.buffer_before_start_minutes, 45);
    /// assert_eq!(rules.buffer_after_end_minutes, 30);
    /// assert_eq!(rules.radius_meters, 80.0);
    /// ```
    pub fn from_settings(payload: &SettingsPayload, defaults: &AttendanceRules) -> Self {
        let minutes = |value: &Option<Value>, fallback: u32| {
            value
                .as_ref()
                .and_then(numeric_value)
                // saturating cast, negatives become 0
                .map(|n| n.max(0.0) as u32)
                .unwrap_or(fallback)
        };

        let latitude = payload
            .latitude
            .as_ref()
            .and_then(numeric_value)
            .filter(|lat| (-90.0..=90.0).contains(lat))
            .unwrap_or(defaults.office_location.latitude);
        let longitude = payload
            .longitude
            .as_ref()
            .and_then(numeric_value)
            .filter(|lon| (-180.0..=180.0).contains(lon))
            .unwrap_or(defaults.office_location.longitude);

        let raw_radius = payload.radius_m.as_ref().and_then(numeric_value);
        let radius_meters = raw_radius
            .filter(|r| *r > 0.0)
            .unwrap_or(defaults.radius_meters);

        let requires_geofence = payload
            .requires_geofence
            .as_ref()
            .and_then(flag_value)
            .or_else(|| raw_radius.map(|r| r > 0.0))
            .unwrap_or(defaults.requires_geofence);

        Self {
            buffer_before_start_minutes: minutes(
                &payload.buffer_before_start,
                defaults.buffer_before_start_minutes,
            ),
            buffer_after_end_minutes: minutes(
                &payload.buffer_after_end,
                defaults.buffer_after_end_minutes,
            ),
            office_location: Coordinate::new(latitude, longitude),
            radius_meters,
            requires_geofence,
        }
    }
}

fn flag_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
