//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    DEFAULT_DAILY_ORDINARY_HOURS, DEFAULT_HOURLY_RATE, DEFAULT_SHIFT_REMINDER_MINUTES,
    DEFAULT_WEEKLY_TARGET_HOURS,
};
use crate::models::AttendanceRules;

/// An inclusive range of whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Smallest allowed value.
    pub min: i64,
    /// Largest allowed value.
    pub max: i64,
}

impl IntRange {
    /// Creates a range.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within the range.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Ranges an owner may choose from when updating the attendance settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsBounds {
    /// Allowed minutes before shift start.
    pub buffer_before_start: IntRange,
    /// Allowed minutes after shift end.
    pub buffer_after_end: IntRange,
    /// Allowed geofence radius in meters.
    pub radius_m: IntRange,
}

impl Default for SettingsBounds {
    fn default() -> Self {
        Self {
            buffer_before_start: IntRange::new(30, 60),
            buffer_after_end: IntRange::new(30, 240),
            radius_m: IntRange::new(50, 100),
        }
    }
}

/// Contents of `rules.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules used when the backend supplies none or malformed values.
    pub defaults: AttendanceRules,
    /// Ranges for owner updates.
    #[serde(default)]
    pub settings_bounds: SettingsBounds,
}

/// Contents of `payroll.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Hourly rate for employees without their own.
    pub default_hourly_rate: Decimal,
    /// Weekly target hours for progress.
    pub weekly_target_hours: Decimal,
    /// Ordinary hours per day; time beyond counts as overtime.
    pub daily_ordinary_hours: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            default_hourly_rate: DEFAULT_HOURLY_RATE,
            weekly_target_hours: DEFAULT_WEEKLY_TARGET_HOURS,
            daily_ordinary_hours: DEFAULT_DAILY_ORDINARY_HOURS,
        }
    }
}

/// Contents of `client.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for backend calls, in seconds.
    pub request_timeout_secs: u64,
    /// Timeout for a device location request, in seconds.
    pub location_timeout_secs: u64,
    /// Lead time for the "shift starting soon" signal, in minutes.
    pub shift_reminder_minutes: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            location_timeout_secs: 15,
            shift_reminder_minutes: DEFAULT_SHIFT_REMINDER_MINUTES,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceConfig {
    rules: RulesConfig,
    payroll: PayrollConfig,
    client: ClientConfig,
}

impl AttendanceConfig {
    /// Assembles a configuration from its parts.
    pub fn new(rules: RulesConfig, payroll: PayrollConfig, client: ClientConfig) -> Self {
        Self {
            rules,
            payroll,
            client,
        }
    }

    /// Returns the rules configuration.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Returns the payroll configuration.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the client configuration.
    pub fn client(&self) -> &ClientConfig {
        &self.client
    }
}
