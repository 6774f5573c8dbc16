//! Calculation logic for the attendance engine.
//!
//! This module contains the pure functions behind attendance decisions:
//! geofence distance, check-in/check-out windows, eligibility and its
//! state, weekly and payroll aggregation, period summaries, and validation
//! of schedule drafts and settings updates.

mod aggregation;
mod eligibility;
mod geo_distance;
mod period_summary;
mod schedule_validation;
mod schedule_window;
mod settings_validation;

pub use aggregation::{
    DEFAULT_HOURLY_RATE, DEFAULT_WEEKLY_TARGET_HOURS, payroll_line, payroll_report, week_start,
    week_summary, worked_hours, worked_seconds,
};
pub use eligibility::{
    DEFAULT_SHIFT_REMINDER_MINUTES, EligibilityAssessment, assess, attendance_state,
    check_in_status, evaluate, shift_starting_soon,
};
pub use geo_distance::{EARTH_RADIUS_METERS, GeofenceCheck, check_geofence, distance_meters};
pub use period_summary::{DEFAULT_DAILY_ORDINARY_HOURS, summarize_period};
pub use schedule_validation::{ScheduleDraft, validate_schedule, validated_shift};
pub use schedule_window::{ScheduleWindow, compute_window};
pub use settings_validation::{validate_rules_update, validated_rules};
