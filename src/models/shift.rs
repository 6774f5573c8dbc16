//! Shift variants and scheduled shifts.
//!
//! A shift whose end time is earlier than its start time crosses midnight;
//! its end instant falls on the day after the scheduled date.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::serde_helpers::{clock_time, id_string};

/// The named work periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    /// Morning shift, 09:00 to 14:00.
    Pagi,
    /// Afternoon shift, 14:00 to 19:00.
    Siang,
    /// Evening shift, 19:00 to 00:00 (crosses midnight).
    Malam,
}

/// Canonical start and end hours/minutes per shift.
const SHIFT_TABLE: [(ShiftKind, (u32, u32), (u32, u32)); 3] = [
    (ShiftKind::Pagi, (9, 0), (14, 0)),
    (ShiftKind::Siang, (14, 0), (19, 0)),
    (ShiftKind::Malam, (19, 0), (0, 0)),
];

/// Canonical clock times of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTimes {
    /// Start time of the shift.
    pub start: NaiveTime,
    /// End time of the shift; earlier than `start` for overnight shifts.
    pub end: NaiveTime,
}

impl ShiftKind {
    /// All shift variants in schedule order.
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Pagi, ShiftKind::Siang, ShiftKind::Malam];

    /// Returns the canonical start and end times for this shift.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::ShiftKind;
    /// use chrono::NaiveTime;
    ///
    /// let times = ShiftKind::Malam.canonical_times();
    /// assert_eq!(times.start, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    /// assert_eq!(times.end, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    /// ```
    pub fn canonical_times(self) -> ShiftTimes {
        let (_, (start_h, start_m), (end_h, end_m)) = SHIFT_TABLE
            .iter()
            .copied()
            .find(|(kind, _, _)| *kind == self)
            .unwrap_or(SHIFT_TABLE[0]);

        ShiftTimes {
            start: NaiveTime::from_hms_opt(start_h, start_m, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(end_h, end_m, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Returns the shift's display name.
    pub fn name(self) -> &'static str {
        match self {
            ShiftKind::Pagi => "Pagi",
            ShiftKind::Siang => "Siang",
            ShiftKind::Malam => "Malam",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known shift.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shift '{0}', expected one of Pagi, Siang, Malam")]
pub struct ParseShiftError(pub String);

impl FromStr for ShiftKind {
    type Err = ParseShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShiftKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseShiftError(wanted.to_string()))
    }
}

/// A shift assigned to an employee on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// The employee the shift is assigned to.
    #[serde(with = "id_string", alias = "pegawai_id")]
    pub employee_id: String,
    /// The date the shift starts on.
    #[serde(alias = "tanggal")]
    pub date: NaiveDate,
    /// The shift variant.
    pub shift: ShiftKind,
    /// Scheduled start time.
    #[serde(with = "clock_time", alias = "jam_mulai")]
    pub start_time: NaiveTime,
    /// Scheduled end time.
    #[serde(with = "clock_time", alias = "jam_selesai")]
    pub end_time: NaiveTime,
}

impl ScheduledShift {
    /// Creates a scheduled shift using the variant's canonical times.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{ScheduledShift, ShiftKind};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    /// let shift = ScheduledShift::canonical("emp_001", date, ShiftKind::Malam);
    /// assert!(shift.crosses_midnight());
    /// assert_eq!(shift.end_instant().date(), NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
    /// ```
    pub fn canonical(employee_id: impl Into<String>, date: NaiveDate, shift: ShiftKind) -> Self {
        let times = shift.canonical_times();
        Self {
            employee_id: employee_id.into(),
            date,
            shift,
            start_time: times.start,
            end_time: times.end,
        }
    }

    /// Returns true if the end time is before the start time.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// The instant the shift starts.
    pub fn start_instant(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// The instant the shift ends, on the next day for overnight shifts.
    pub fn end_instant(&self) -> NaiveDateTime {
        let end = self.date.and_time(self.end_time);
        if self.crosses_midnight() {
            end + Duration::days(1)
        } else {
            end
        }
    }

    /// Scheduled length of the shift in hours.
    pub fn scheduled_hours(&self) -> Decimal {
        let minutes = (self.end_instant() - self.start_instant()).num_minutes();
        Decimal::new(minutes, 0) / Decimal::new(60, 0)
    }
}
