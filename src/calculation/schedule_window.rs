//! Check-in/check-out windows derived from a shift and the buffers.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRules, ScheduledShift};

/// The instants that gate check-in and check-out for one scheduled shift.
///
/// Check-in and check-out share one closing deadline: `shift_end` plus the
/// after-end buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    /// The instant the shift starts.
    pub shift_start: NaiveDateTime,
    /// The instant the shift ends; the next day for overnight shifts.
    pub shift_end: NaiveDateTime,
    /// Earliest check-in: `shift_start` minus the before-start buffer.
    pub check_in_opens_at: NaiveDateTime,
    /// Latest check-in: `shift_end` plus the after-end buffer.
    pub check_in_deadline: NaiveDateTime,
}

impl ScheduleWindow {
    /// Latest check-out, identical to the check-in deadline.
    pub fn check_out_deadline(&self) -> NaiveDateTime {
        self.check_in_deadline
    }

    /// Returns true if `now` lies within the check-in window, bounds included.
    pub fn is_check_in_open(&self, now: NaiveDateTime) -> bool {
        now >= self.check_in_opens_at && now <= self.check_in_deadline
    }

    /// Returns true if `now` lies within the check-out window, bounds included.
    pub fn is_check_out_open(&self, now: NaiveDateTime) -> bool {
        now >= self.shift_end && now <= self.check_out_deadline()
    }
}

/// Computes the check-in/check-out window for a scheduled shift.
///
/// # Arguments
///
/// * `shift` - The scheduled shift; an end time earlier than the start time
///   places the end on the following day
/// * `rules` - The attendance rules supplying the buffers
///
/// # Returns
///
/// A [`ScheduleWindow`] with the shift instants, the check-in opening and the
/// shared check-in/check-out deadline.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_window;
/// use attendance_engine::models::{AttendanceRules, ScheduledShift, ShiftKind};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let shift = ScheduledShift::canonical("emp_001", date, ShiftKind::Pagi);
/// let window = compute_window(&shift, &AttendanceRules::default());
///
/// assert_eq!(window.check_in_opens_at, date.and_hms_opt(8, 30, 0).unwrap());
/// assert_eq!(window.check_in_deadline, date.and_hms_opt(14, 30, 0).unwrap());
/// ```
pub fn compute_window(shift: &ScheduledShift, rules: &AttendanceRules) -> ScheduleWindow {
    let shift_start = shift.start_instant();
    let shift_end = shift.end_instant();

    ScheduleWindow {
        shift_start,
        shift_end,
        check_in_opens_at: shift_start
            - Duration::minutes(i64::from(rules.buffer_before_start_minutes)),
        check_in_deadline: shift_end + Duration::minutes(i64::from(rules.buffer_after_end_minutes)),
    }
}
