//! Core data models for the attendance engine.
//!
//! Schedules, attendance records, rules and the values the engine derives
//! from them.

mod attendance;
mod audit;
mod availability;
mod employee;
mod location;
mod rules;
mod serde_helpers;
mod shift;
mod summary;
mod validation;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use audit::{AuditRecorder, AuditStep};
pub use availability::{AttendanceState, CheckAvailability, IneligibilityReason};
pub use employee::{Employee, Role};
pub use location::{Coordinate, LocationError, LocationSample};
pub use rules::{
    AttendanceRules, DEFAULT_BUFFER_AFTER_END_MINUTES, DEFAULT_BUFFER_BEFORE_START_MINUTES,
    DEFAULT_OFFICE_LOCATION, DEFAULT_RADIUS_METERS, SettingsPayload,
};
pub use serde_helpers::{decimal_value, numeric_value, optional_id, parse_clock_time};
pub use shift::{ParseShiftError, ScheduledShift, ShiftKind, ShiftTimes};
pub use summary::{DayScore, PayrollLine, PayrollReport, PayrollTotals, PeriodSummary, WeekSummary};
pub use validation::ValidationErrors;
