//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceRules;

use super::types::{
    AttendanceConfig, ClientConfig, IntRange, PayrollConfig, RulesConfig, SettingsBounds,
};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── rules.yaml    # Default attendance rules and owner settings bounds
/// ├── payroll.yaml  # Default hourly rate, weekly target, daily ordinary hours
/// └── client.yaml   # Backend and location timeouts, shift reminder lead time
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Default radius: {} m", loader.default_rules().radius_meters);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AttendanceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any value is outside its allowed range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules = Self::load_yaml::<RulesConfig>(&path.join("rules.yaml"))?;
        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let client = Self::load_yaml::<ClientConfig>(&path.join("client.yaml"))?;

        Self::from_config(AttendanceConfig::new(rules, payroll, client))
    }

    /// Wraps an already-built configuration after checking its values.
    pub fn from_config(config: AttendanceConfig) -> EngineResult<Self> {
        Self::validate_rules(&config.rules().defaults)?;
        Self::validate_bounds(&config.rules().settings_bounds)?;
        Self::validate_payroll(config.payroll())?;

        if config.client().request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be greater than 0"));
        }
        if config.client().location_timeout_secs == 0 {
            return Err(invalid("location_timeout_secs", "must be greater than 0"));
        }

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_rules(rules: &AttendanceRules) -> EngineResult<()> {
        if !rules.office_location.is_valid() {
            return Err(invalid(
                "latitude/longitude",
                "must be within -90..90 and -180..180",
            ));
        }
        if !(rules.radius_meters.is_finite() && rules.radius_meters > 0.0) {
            return Err(invalid("radius_m", "must be greater than 0"));
        }
        Ok(())
    }

    fn validate_bounds(bounds: &SettingsBounds) -> EngineResult<()> {
        let ranges: [(&str, IntRange); 3] = [
            ("settings_bounds.buffer_before_start", bounds.buffer_before_start),
            ("settings_bounds.buffer_after_end", bounds.buffer_after_end),
            ("settings_bounds.radius_m", bounds.radius_m),
        ];
        for (field, range) in ranges {
            if range.min < 0 || range.min > range.max {
                return Err(invalid(
                    field,
                    &format!("invalid range {}..={}", range.min, range.max),
                ));
            }
        }
        Ok(())
    }

    fn validate_payroll(payroll: &PayrollConfig) -> EngineResult<()> {
        if payroll.default_hourly_rate < Decimal::ZERO {
            return Err(invalid("default_hourly_rate", "must not be negative"));
        }
        if payroll.weekly_target_hours <= Decimal::ZERO {
            return Err(invalid("weekly_target_hours", "must be greater than 0"));
        }
        if payroll.daily_ordinary_hours <= Decimal::ZERO {
            return Err(invalid("daily_ordinary_hours", "must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AttendanceConfig {
        &self.config
    }

    /// Rules used when the backend supplies none.
    pub fn default_rules(&self) -> &AttendanceRules {
        &self.config.rules().defaults
    }

    /// Ranges for owner settings updates.
    pub fn settings_bounds(&self) -> &SettingsBounds {
        &self.config.rules().settings_bounds
    }

    /// Payroll defaults.
    pub fn payroll(&self) -> &PayrollConfig {
        self.config.payroll()
    }

    /// Client timeouts and reminder lead time.
    pub fn client(&self) -> &ClientConfig {
        self.config.client()
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidSettings {
        field: field.to_string(),
        message: message.to_string(),
    }
}
