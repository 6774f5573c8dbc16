//! Configuration loading and management for the attendance engine.
//!
//! This module loads default attendance rules, owner settings bounds,
//! payroll defaults and client timeouts from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Weekly target: {} hours", config.payroll().weekly_target_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, ClientConfig, IntRange, PayrollConfig, RulesConfig, SettingsBounds,
};
