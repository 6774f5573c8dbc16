//! Validation of owner updates to the attendance settings.
//!
//! Unlike [`AttendanceRules::from_settings`], which reads whatever the
//! backend sends and falls back to defaults, an update must supply every
//! field and each must be within its configured range.

use serde_json::Value;

use crate::config::{IntRange, SettingsBounds};
use crate::models::{AttendanceRules, Coordinate, SettingsPayload, ValidationErrors, numeric_value};

fn whole_number(value: &Option<Value>) -> Result<i64, &'static str> {
    let n = value.as_ref().ok_or("is required.")?;
    let n = numeric_value(n).ok_or("must be a number.")?;
    if n.fract() != 0.0 {
        return Err("must be a whole number.");
    }
    Ok(n as i64)
}

fn check_range(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &Option<Value>,
    range: IntRange,
) -> Option<i64> {
    match whole_number(value) {
        Err(problem) => {
            errors.add(field, format!("{} {}", label, problem));
            None
        }
        Ok(n) if !range.contains(n) => {
            errors.add(
                field,
                format!("{} must be between {} and {}.", label, range.min, range.max),
            );
            None
        }
        Ok(n) => Some(n),
    }
}

fn check_coordinate(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &Option<Value>,
    limit: f64,
) -> Option<f64> {
    let Some(raw) = value else {
        errors.add(field, format!("{} is required.", label));
        return None;
    };
    match numeric_value(raw) {
        None => {
            errors.add(field, format!("{} must be a number.", label));
            None
        }
        Some(n) if !(-limit..=limit).contains(&n) => {
            errors.add(field, format!("{} must be between -{} and {}.", label, limit, limit));
            None
        }
        Some(n) => Some(n),
    }
}

struct CheckedUpdate {
    buffer_before_start: Option<i64>,
    buffer_after_end: Option<i64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius_m: Option<i64>,
}

fn check_update(
    update: &SettingsPayload,
    bounds: &SettingsBounds,
    errors: &mut ValidationErrors,
) -> CheckedUpdate {
    CheckedUpdate {
        buffer_before_start: check_range(
            errors,
            "buffer_before_start",
            "Buffer before start",
            &update.buffer_before_start,
            bounds.buffer_before_start,
        ),
        buffer_after_end: check_range(
            errors,
            "buffer_after_end",
            "Buffer after end",
            &update.buffer_after_end,
            bounds.buffer_after_end,
        ),
        latitude: check_coordinate(errors, "latitude", "Latitude", &update.latitude, 90.0),
        longitude: check_coordinate(errors, "longitude", "Longitude", &update.longitude, 180.0),
        radius_m: check_range(errors, "radius_m", "Radius", &update.radius_m, bounds.radius_m),
    }
}

/// Validates an owner's settings update against the configured ranges.
///
/// Every field is required. Buffers and radius must be whole numbers within
/// their bounds; latitude and longitude must be valid coordinates.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::validate_rules_update;
/// use attendance_engine::config::SettingsBounds;
/// use attendance_engine::models::SettingsPayload;
/// use serde_json::json;
///
/// let update: SettingsPayload = serde_json::from_value(json!({
///     "buffer_before_start": 45,
///     "buffer_after_end": 300,
///     "latitude": -7.78,
///     "longitude": 110.41,
///     "radius_m": 75
/// })).unwrap();
///
/// let errors = validate_rules_update(&update, &SettingsBounds::default());
/// assert_eq!(errors.len(), 1);
/// assert_eq!(
///     errors.get("buffer_after_end"),
///     Some("Buffer after end must be between 30 and 240.")
/// );
/// ```
pub fn validate_rules_update(
    update: &SettingsPayload,
    bounds: &SettingsBounds,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    check_update(update, bounds, &mut errors);
    errors
}

/// Validates an update and builds the resulting rules.
///
/// Geofence enforcement follows the radius, which is always positive once
/// validated.
///
/// # Errors
///
/// Returns the validation messages when any field fails.
pub fn validated_rules(
    update: &SettingsPayload,
    bounds: &SettingsBounds,
) -> Result<AttendanceRules, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let checked = check_update(update, bounds, &mut errors);

    match checked {
        CheckedUpdate {
            buffer_before_start: Some(before),
            buffer_after_end: Some(after),
            latitude: Some(latitude),
            longitude: Some(longitude),
            radius_m: Some(radius),
        } if errors.is_empty() => Ok(AttendanceRules {
            buffer_before_start_minutes: u32::try_from(before).unwrap_or(0),
            buffer_after_end_minutes: u32::try_from(after).unwrap_or(0),
            office_location: Coordinate::new(latitude, longitude),
            radius_meters: radius as f64,
            requires_geofence: radius > 0,
        }),
        _ => Err(errors),
    }
}
