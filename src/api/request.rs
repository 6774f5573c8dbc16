//! Request types for the attendance API.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::ScheduleDraft;
use crate::models::{
    AttendanceRecord, AttendanceRules, Coordinate, Employee, LocationError, LocationSample, Role,
    ScheduledShift,
};

/// Request body for `POST /eligibility`.
///
/// Every field is optional: without a shift both actions are unavailable,
/// without a location the sample is still pending, and without rules the
/// current rules snapshot is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityRequest {
    /// The instant to evaluate at; defaults to the server clock.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    /// Today's shift.
    #[serde(default)]
    pub shift: Option<ScheduledShift>,
    /// Today's attendance record.
    #[serde(default)]
    pub record: Option<AttendanceRecord>,
    /// The device position.
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// The device failure, when no position is available.
    #[serde(default)]
    pub location_error: Option<LocationError>,
    /// Rules to evaluate against instead of the current snapshot.
    #[serde(default)]
    pub rules: Option<AttendanceRules>,
    /// Lead time for the starting-soon flag, in minutes.
    #[serde(default)]
    pub reminder_minutes: Option<i64>,
}

impl EligibilityRequest {
    /// The location sample described by the request. A position wins over
    /// an error; with neither the sample is pending.
    pub fn location_sample(&self) -> LocationSample {
        match (&self.location, &self.location_error) {
            (Some(position), _) => LocationSample::Fix(*position),
            (None, Some(error)) => LocationSample::Unavailable(error.clone()),
            (None, None) => LocationSample::Pending,
        }
    }
}

/// Request body for `POST /summary/week`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSummaryRequest {
    /// The employee's attendance records.
    pub records: Vec<AttendanceRecord>,
    /// First day of the week; defaults to the Monday of the current week.
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
    /// Weekly target hours; defaults to the configured target.
    #[serde(default)]
    pub target_hours: Option<Decimal>,
}

/// Request body for `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Records to pay.
    pub records: Vec<AttendanceRecord>,
    /// Rate for employees without their own; defaults to the configured rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// Employees with their own hourly rates.
    #[serde(default)]
    pub roster: Vec<Employee>,
}

/// Request body for `POST /summary/period`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryRequest {
    /// Records to summarize.
    pub records: Vec<AttendanceRecord>,
    /// First date of the period.
    pub from: NaiveDate,
    /// Last date of the period.
    pub to: NaiveDate,
    /// Ordinary hours per day; defaults to the configured value.
    #[serde(default)]
    pub daily_ordinary_hours: Option<Decimal>,
}

/// Request body for `POST /schedules/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleValidationRequest {
    /// The form contents.
    pub draft: ScheduleDraft,
    /// The date past dates are measured against; defaults to the server date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// The role submitting the draft.
    #[serde(default)]
    pub actor: Role,
    /// Known employees.
    #[serde(default)]
    pub roster: Vec<Employee>,
}
