//! Check-in/check-out eligibility.
//!
//! Eligibility is a pure function of the current instant, today's shift, the
//! rules, today's attendance record and the latest location sample. Nothing
//! here mutates state or performs I/O; the state is recomputed on every
//! evaluation.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::geo_distance::{GeofenceCheck, check_geofence};
use super::schedule_window::{ScheduleWindow, compute_window};
use crate::models::{
    AttendanceRecord, AttendanceRules, AttendanceState, AttendanceStatus, AuditRecorder,
    AuditStep, CheckAvailability, IneligibilityReason, LocationSample, ScheduledShift,
};

/// Default lead time for the "shift starting soon" signal.
pub const DEFAULT_SHIFT_REMINDER_MINUTES: i64 = 60;

/// Result of the location gate.
#[derive(Debug, Clone, PartialEq)]
enum LocationGate {
    /// Geofence not enforced.
    NotRequired,
    /// Enforced and the sample is inside the fence.
    Inside(GeofenceCheck),
    /// Enforced and the sample does not allow acting.
    Blocked {
        reason: IneligibilityReason,
        check: Option<GeofenceCheck>,
    },
}

impl LocationGate {
    fn evaluate(rules: &AttendanceRules, location: &LocationSample) -> Self {
        if !rules.requires_geofence {
            return LocationGate::NotRequired;
        }
        match location {
            LocationSample::Pending => LocationGate::Blocked {
                reason: IneligibilityReason::AwaitingLocation,
                check: None,
            },
            LocationSample::Unavailable(error) => LocationGate::Blocked {
                reason: IneligibilityReason::LocationUnavailable {
                    error: error.clone(),
                },
                check: None,
            },
            LocationSample::Fix(position) => {
                let check = check_geofence(*position, rules);
                if check.inside {
                    LocationGate::Inside(check)
                } else {
                    LocationGate::Blocked {
                        reason: IneligibilityReason::OutsideGeofence {
                            distance_meters: check.distance_meters,
                            radius_meters: check.radius_meters,
                        },
                        check: Some(check),
                    }
                }
            }
        }
    }

    fn allowed(&self) -> bool {
        !matches!(self, LocationGate::Blocked { .. })
    }

    fn reason(&self) -> Option<IneligibilityReason> {
        match self {
            LocationGate::Blocked { reason, .. } => Some(reason.clone()),
            _ => None,
        }
    }

    fn distance_meters(&self) -> Option<f64> {
        match self {
            LocationGate::Inside(check) => Some(check.distance_meters),
            LocationGate::Blocked { check, .. } => check.map(|c| c.distance_meters),
            LocationGate::NotRequired => None,
        }
    }
}

/// Whole minutes from `now` until `later`, rounded up.
fn minutes_until(now: NaiveDateTime, later: NaiveDateTime) -> i64 {
    let millis = (later - now).num_milliseconds().max(0);
    (millis + 59_999) / 60_000
}

fn check_in_reason(
    now: NaiveDateTime,
    window: &ScheduleWindow,
    checked_in: bool,
    gate: &LocationGate,
) -> Option<IneligibilityReason> {
    if checked_in {
        Some(IneligibilityReason::AlreadyCheckedIn)
    } else if let Some(reason) = gate.reason() {
        Some(reason)
    } else if now > window.check_in_deadline {
        Some(IneligibilityReason::CheckInClosed {
            deadline: window.check_in_deadline,
        })
    } else if now < window.check_in_opens_at {
        Some(IneligibilityReason::CheckInNotYetOpen {
            minutes_remaining: minutes_until(now, window.check_in_opens_at),
        })
    } else {
        None
    }
}

fn check_out_reason(
    now: NaiveDateTime,
    window: &ScheduleWindow,
    checked_in: bool,
    checked_out: bool,
    show_check_out: bool,
    gate: &LocationGate,
) -> Option<IneligibilityReason> {
    if now > window.check_out_deadline() {
        Some(IneligibilityReason::CheckOutDeadlinePassed {
            deadline: window.check_out_deadline(),
        })
    } else if !show_check_out {
        if checked_in {
            Some(IneligibilityReason::CheckOutNotYetAvailable {
                available_at: window.shift_end,
            })
        } else {
            Some(IneligibilityReason::NotCheckedIn)
        }
    } else if checked_out {
        Some(IneligibilityReason::AlreadyCheckedOut)
    } else {
        gate.reason()
    }
}

/// Everything decided during one evaluation, kept for the audit trace.
struct Decision {
    availability: CheckAvailability,
    window: Option<ScheduleWindow>,
    gate: LocationGate,
}

fn decide(
    now: NaiveDateTime,
    shift: Option<&ScheduledShift>,
    rules: &AttendanceRules,
    record: Option<&AttendanceRecord>,
    location: &LocationSample,
) -> Decision {
    let gate = LocationGate::evaluate(rules, location);

    let Some(shift) = shift else {
        return Decision {
            availability: CheckAvailability::unavailable(),
            window: None,
            gate,
        };
    };

    let window = compute_window(shift, rules);
    let checked_in = record.is_some_and(AttendanceRecord::has_checked_in);
    let checked_out = record.is_some_and(AttendanceRecord::has_checked_out);
    let allowed = gate.allowed();

    let can_check_in = !checked_in && allowed && window.is_check_in_open(now);
    let show_check_out = checked_in && window.is_check_out_open(now);
    let can_check_out = show_check_out && !checked_out && allowed;

    let check_in_reason = if can_check_in {
        None
    } else {
        check_in_reason(now, &window, checked_in, &gate)
    };
    let check_out_reason = if can_check_out {
        None
    } else {
        check_out_reason(now, &window, checked_in, checked_out, show_check_out, &gate)
    };

    let headline = if checked_in {
        check_out_reason.as_ref()
    } else {
        check_in_reason.as_ref()
    };

    Decision {
        availability: CheckAvailability {
            can_check_in,
            can_check_out,
            show_check_out,
            reason: headline.map(ToString::to_string).unwrap_or_default(),
            check_in_reason,
            check_out_reason,
            distance_meters: gate.distance_meters(),
        },
        window: Some(window),
        gate,
    }
}

/// Decides whether check-in and check-out are currently permitted.
///
/// # Arguments
///
/// * `now` - The current local instant
/// * `shift` - Today's scheduled shift, if any
/// * `rules` - The attendance rules in force
/// * `record` - Today's attendance record, if any
/// * `location` - The latest location sample
///
/// # Returns
///
/// A [`CheckAvailability`]. Without a shift both actions are unavailable and
/// the reason is empty. When check-in is unavailable its reason is, in order
/// of precedence: already checked in, location pending/denied/outside the
/// geofence, window closed, window not yet open. When check-out is
/// unavailable its reason is: deadline passed, not yet visible, already
/// checked out, location.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::evaluate;
/// use attendance_engine::models::{
///     AttendanceRules, LocationSample, ScheduledShift, ShiftKind,
/// };
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let shift = ScheduledShift::canonical("emp_001", date, ShiftKind::Pagi);
/// let rules = AttendanceRules::default();
/// let here = LocationSample::Fix(rules.office_location);
///
/// let early = evaluate(date.and_hms_opt(8, 29, 0).unwrap(), Some(&shift), &rules, None, &here);
/// assert!(!early.can_check_in);
/// assert_eq!(early.reason, "Check-in opens shortly.");
///
/// let open = evaluate(date.and_hms_opt(8, 30, 0).unwrap(), Some(&shift), &rules, None, &here);
/// assert!(open.can_check_in);
/// ```
pub fn evaluate(
    now: NaiveDateTime,
    shift: Option<&ScheduledShift>,
    rules: &AttendanceRules,
    record: Option<&AttendanceRecord>,
    location: &LocationSample,
) -> CheckAvailability {
    decide(now, shift, rules, record, location).availability
}

/// Derives the attendance state for today.
///
/// The state depends only on time and the record; location does not move an
/// employee between states.
pub fn attendance_state(
    now: NaiveDateTime,
    window: Option<&ScheduleWindow>,
    record: Option<&AttendanceRecord>,
) -> AttendanceState {
    let Some(window) = window else {
        return AttendanceState::NoSchedule;
    };
    let checked_in = record.is_some_and(AttendanceRecord::has_checked_in);
    let checked_out = record.is_some_and(AttendanceRecord::has_checked_out);

    if checked_out {
        AttendanceState::CheckedOut
    } else if checked_in {
        if now > window.check_out_deadline() {
            AttendanceState::Expired
        } else if now >= window.shift_end {
            AttendanceState::CheckOutOpen
        } else {
            AttendanceState::CheckedIn
        }
    } else if now < window.check_in_opens_at {
        AttendanceState::AwaitingWindow
    } else if now <= window.check_in_deadline {
        AttendanceState::CheckInOpen
    } else {
        AttendanceState::Expired
    }
}

/// Returns true if the shift starts after `now` and within `lead_minutes`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::shift_starting_soon;
/// use attendance_engine::models::{ScheduledShift, ShiftKind};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let shift = ScheduledShift::canonical("emp_001", date, ShiftKind::Pagi);
///
/// assert!(shift_starting_soon(date.and_hms_opt(8, 0, 0).unwrap(), &shift, 60));
/// assert!(!shift_starting_soon(date.and_hms_opt(7, 59, 0).unwrap(), &shift, 60));
/// assert!(!shift_starting_soon(date.and_hms_opt(9, 0, 0).unwrap(), &shift, 60));
/// ```
pub fn shift_starting_soon(now: NaiveDateTime, shift: &ScheduledShift, lead_minutes: i64) -> bool {
    let start = shift.start_instant();
    start > now && start - now <= Duration::minutes(lead_minutes)
}

/// Status to record for a check-in at `now`: late after shift start,
/// present otherwise.
pub fn check_in_status(now: NaiveDateTime, window: &ScheduleWindow) -> AttendanceStatus {
    if now > window.shift_start {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// Eligibility together with the derived state and the checks behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    /// What the employee may do now.
    pub availability: CheckAvailability,
    /// Where the employee stands today.
    pub state: AttendanceState,
    /// Today's window, when a shift is scheduled.
    pub window: Option<ScheduleWindow>,
    /// The status a check-in made now would receive.
    pub check_in_status: Option<AttendanceStatus>,
    /// The shift starts within the reminder lead time.
    pub shift_starting_soon: bool,
    /// The rule checks that produced the decision.
    pub audit_trace: Vec<AuditStep>,
}

/// Evaluates eligibility and explains it.
///
/// Produces the same [`CheckAvailability`] as [`evaluate`], plus the
/// attendance state, the window and an audit step per rule checked.
pub fn assess(
    now: NaiveDateTime,
    shift: Option<&ScheduledShift>,
    rules: &AttendanceRules,
    record: Option<&AttendanceRecord>,
    location: &LocationSample,
    reminder_lead_minutes: i64,
) -> EligibilityAssessment {
    let decision = decide(now, shift, rules, record, location);
    let state = attendance_state(now, decision.window.as_ref(), record);
    let mut audit = AuditRecorder::new();

    audit.record(
        "schedule_lookup",
        "Schedule Lookup",
        serde_json::json!({ "now": now }),
        serde_json::json!({ "shift": shift }),
        match shift {
            Some(s) => format!(
                "{} shift scheduled from {} to {}",
                s.shift,
                s.start_time.format("%H:%M"),
                s.end_time.format("%H:%M")
            ),
            None => "no shift scheduled today, both actions unavailable".to_string(),
        },
    );

    if let Some(window) = &decision.window {
        audit.record(
            "schedule_window",
            "Schedule Window",
            serde_json::json!({
                "buffer_before_start": rules.buffer_before_start_minutes,
                "buffer_after_end": rules.buffer_after_end_minutes,
            }),
            serde_json::to_value(window).unwrap_or_default(),
            format!(
                "check-in opens at {} and check-in/check-out close at {}",
                window.check_in_opens_at.format("%Y-%m-%d %H:%M"),
                window.check_in_deadline.format("%Y-%m-%d %H:%M")
            ),
        );
    }

    audit.record(
        "geofence",
        "Geofence",
        serde_json::json!({
            "requires_geofence": rules.requires_geofence,
            "radius_m": rules.radius_meters,
            "location": location.coordinate(),
        }),
        serde_json::json!({
            "allowed": decision.gate.allowed(),
            "distance_meters": decision.gate.distance_meters(),
        }),
        match &decision.gate {
            LocationGate::NotRequired => "geofence not enforced".to_string(),
            LocationGate::Inside(check) => format!(
                "{:.0} m from the office is within the {:.0} m radius",
                check.distance_meters, check.radius_meters
            ),
            LocationGate::Blocked { reason, .. } => reason.to_string(),
        },
    );

    if decision.window.is_some() {
        let availability = &decision.availability;
        audit.record(
            "check_in_eligibility",
            "Check-in Eligibility",
            serde_json::json!({
                "checked_in": record.is_some_and(AttendanceRecord::has_checked_in),
            }),
            serde_json::json!({ "can_check_in": availability.can_check_in }),
            availability
                .check_in_reason
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "check-in permitted".to_string()),
        );
        audit.record(
            "check_out_eligibility",
            "Check-out Eligibility",
            serde_json::json!({
                "checked_out": record.is_some_and(AttendanceRecord::has_checked_out),
                "show_check_out": availability.show_check_out,
            }),
            serde_json::json!({ "can_check_out": availability.can_check_out }),
            availability
                .check_out_reason
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "check-out permitted".to_string()),
        );
    }

    EligibilityAssessment {
        check_in_status: decision
            .window
            .as_ref()
            .filter(|_| decision.availability.can_check_in)
            .map(|w| check_in_status(now, w)),
        shift_starting_soon: shift
            .is_some_and(|s| shift_starting_soon(now, s, reminder_lead_minutes)),
        availability: decision.availability,
        state,
        window: decision.window,
        audit_trace: audit.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::EARTH_RADIUS_METERS;
    use crate::models::{Coordinate, LocationError, ShiftKind};
    use chrono::{NaiveDate, NaiveTime};
    use proptest::prelude::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn pagi() -> ScheduledShift {
        ScheduledShift::canonical("emp_001", make_date("2026-01-15"), ShiftKind::Pagi)
    }

    fn at_office() -> LocationSample {
        LocationSample::Fix(AttendanceRules::default().office_location)
    }

    fn north_of_office(meters: f64) -> LocationSample {
        let office = AttendanceRules::default().office_location;
        let d_lat = (meters / EARTH_RADIUS_METERS).to_degrees();
        LocationSample::Fix(Coordinate::new(office.latitude + d_lat, office.longitude))
    }

    fn checked_in_record(time: &str) -> AttendanceRecord {
        let mut record = AttendanceRecord::new("emp_001", make_date("2026-01-15"));
        record.check_in_time = NaiveTime::parse_from_str(time, "%H:%M:%S").ok();
        record.status = AttendanceStatus::Present;
        record
    }

    fn no_geofence() -> AttendanceRules {
        AttendanceRules {
            requires_geofence: false,
            ..AttendanceRules::default()
        }
    }

    #[test]
    fn test_no_shift_is_unavailable_without_reason() {
        let result = evaluate(
            make_datetime("2026-01-15", "10:00:00"),
            None,
            &AttendanceRules::default(),
            None,
            &at_office(),
        );
        assert_eq!(result, CheckAvailability::unavailable());
    }

    #[test]
    fn test_check_in_opens_at_buffer_boundary() {
        let rules = AttendanceRules::default();
        let shift = pagi();

        let before = evaluate(
            make_datetime("2026-01-15", "08:29:00"),
            Some(&shift),
            &rules,
            None,
            &at_office(),
        );
        assert!(!before.can_check_in);
        assert_eq!(
            before.check_in_reason,
            Some(IneligibilityReason::CheckInNotYetOpen { minutes_remaining: 1 })
        );

        let open = evaluate(
            make_datetime("2026-01-15", "08:30:00"),
            Some(&shift),
            &rules,
            None,
            &at_office(),
        );
        assert!(open.can_check_in);
        assert_eq!(open.check_in_reason, None);
        assert_eq!(open.reason, "");
        assert_eq!(open.distance_meters, Some(0.0));
    }

    #[test]
    fn test_check_in_closes_after_deadline() {
        let rules = AttendanceRules::default();
        let shift = pagi();

        let at_deadline = evaluate(
            make_datetime("2026-01-15", "14:30:00"),
            Some(&shift),
            &rules,
            None,
            &at_office(),
        );
        assert!(at_deadline.can_check_in);

        let after = evaluate(
            make_datetime("2026-01-15", "14:30:01"),
            Some(&shift),
            &rules,
            None,
            &at_office(),
        );
        assert!(!after.can_check_in);
        assert_eq!(
            after.check_in_reason,
            Some(IneligibilityReason::CheckInClosed {
                deadline: make_datetime("2026-01-15", "14:30:00")
            })
        );
    }

    #[test]
    fn test_minutes_remaining_rounds_up() {
        let result = evaluate(
            make_datetime("2026-01-15", "08:05:30"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &at_office(),
        );
        assert_eq!(
            result.check_in_reason,
            Some(IneligibilityReason::CheckInNotYetOpen { minutes_remaining: 25 })
        );
        assert_eq!(result.reason, "Check-in opens in 25 minutes.");
    }

    #[test]
    fn test_awaiting_location_blocks_both_actions() {
        let result = evaluate(
            make_datetime("2026-01-15", "09:00:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &LocationSample::Pending,
        );
        assert!(!result.can_check_in);
        assert!(!result.can_check_out);
        assert_eq!(result.check_in_reason, Some(IneligibilityReason::AwaitingLocation));
        assert_eq!(result.distance_meters, None);
    }

    #[test]
    fn test_location_error_is_a_reason() {
        let result = evaluate(
            make_datetime("2026-01-15", "09:00:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &LocationSample::Unavailable(LocationError::PermissionDenied),
        );
        assert_eq!(
            result.check_in_reason,
            Some(IneligibilityReason::LocationUnavailable {
                error: LocationError::PermissionDenied
            })
        );
        assert_eq!(result.reason, "Location unavailable: location permission denied.");
    }

    #[test]
    fn test_outside_geofence_reports_distance_and_radius() {
        let result = evaluate(
            make_datetime("2026-01-15", "09:00:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &north_of_office(120.0),
        );
        assert!(!result.can_check_in);
        let distance = result.distance_meters.unwrap();
        assert!((distance - 120.0).abs() < 1.0);
        match result.check_in_reason {
            Some(IneligibilityReason::OutsideGeofence { radius_meters, .. }) => {
                assert_eq!(radius_meters, 50.0)
            }
            other => panic!("unexpected reason {:?}", other),
        }
    }

    #[test]
    fn test_location_reason_precedes_window_reasons() {
        // Window not yet open, but the location problem is reported first.
        let result = evaluate(
            make_datetime("2026-01-15", "07:00:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &LocationSample::Pending,
        );
        assert_eq!(result.check_in_reason, Some(IneligibilityReason::AwaitingLocation));
    }

    #[test]
    fn test_geofence_disabled_ignores_location() {
        let rules = no_geofence();
        for sample in [
            LocationSample::Pending,
            LocationSample::Unavailable(LocationError::Timeout),
            north_of_office(10_000.0),
        ] {
            let result = evaluate(
                make_datetime("2026-01-15", "09:00:00"),
                Some(&pagi()),
                &rules,
                None,
                &sample,
            );
            assert!(result.can_check_in);
            assert_eq!(result.distance_meters, None);
        }
    }

    #[test]
    fn test_already_checked_in_takes_precedence() {
        let record = checked_in_record("08:45:00");
        let result = evaluate(
            make_datetime("2026-01-15", "10:00:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            Some(&record),
            &LocationSample::Pending,
        );
        assert!(!result.can_check_in);
        assert_eq!(result.check_in_reason, Some(IneligibilityReason::AlreadyCheckedIn));
    }

    #[test]
    fn test_check_out_not_visible_before_shift_end() {
        let record = checked_in_record("08:45:00");
        let result = evaluate(
            make_datetime("2026-01-15", "13:59:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            Some(&record),
            &at_office(),
        );
        assert!(!result.show_check_out);
        assert!(!result.can_check_out);
        assert_eq!(
            result.check_out_reason,
            Some(IneligibilityReason::CheckOutNotYetAvailable {
                available_at: make_datetime("2026-01-15", "14:00:00")
            })
        );
        assert_eq!(result.reason, "Check-out is available after shift end (14:00).");
    }

    #[test]
    fn test_check_out_open_after_shift_end() {
        let record = checked_in_record("08:45:00");
        let result = evaluate(
            make_datetime("2026-01-15", "14:10:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            Some(&record),
            &at_office(),
        );
        assert!(result.show_check_out);
        assert!(result.can_check_out);
        assert_eq!(result.check_out_reason, None);
    }

    #[test]
    fn test_check_out_deadline_passed_wins() {
        let mut record = checked_in_record("08:45:00");
        record.check_out_time = NaiveTime::from_hms_opt(14, 5, 0);
        let result = evaluate(
            make_datetime("2026-01-15", "15:00:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            Some(&record),
            &at_office(),
        );
        assert_eq!(
            result.check_out_reason,
            Some(IneligibilityReason::CheckOutDeadlinePassed {
                deadline: make_datetime("2026-01-15", "14:30:00")
            })
        );
    }

    #[test]
    fn test_already_checked_out_inside_window() {
        let mut record = checked_in_record("08:45:00");
        record.check_out_time = NaiveTime::from_hms_opt(14, 5, 0);
        let result = evaluate(
            make_datetime("2026-01-15", "14:10:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            Some(&record),
            &at_office(),
        );
        assert!(result.show_check_out);
        assert!(!result.can_check_out);
        assert_eq!(result.check_out_reason, Some(IneligibilityReason::AlreadyCheckedOut));
    }

    #[test]
    fn test_check_out_blocked_outside_geofence() {
        let record = checked_in_record("08:45:00");
        let result = evaluate(
            make_datetime("2026-01-15", "14:10:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            Some(&record),
            &north_of_office(500.0),
        );
        assert!(result.show_check_out);
        assert!(!result.can_check_out);
        assert!(matches!(
            result.check_out_reason,
            Some(IneligibilityReason::OutsideGeofence { .. })
        ));
    }

    #[test]
    fn test_not_checked_in_check_out_reason() {
        let result = evaluate(
            make_datetime("2026-01-15", "14:10:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &at_office(),
        );
        assert_eq!(result.check_out_reason, Some(IneligibilityReason::NotCheckedIn));
        // headline follows the check-in side until the employee checks in
        assert_eq!(result.reason, "");
        assert!(result.can_check_in);
    }

    #[test]
    fn test_overnight_shift_check_out_after_midnight() {
        let shift = ScheduledShift::canonical("emp_001", make_date("2026-01-15"), ShiftKind::Malam);
        let record = checked_in_record("18:50:00");
        let result = evaluate(
            make_datetime("2026-01-16", "00:15:00"),
            Some(&shift),
            &AttendanceRules::default(),
            Some(&record),
            &at_office(),
        );
        assert!(result.can_check_out);
    }

    #[test]
    fn test_attendance_states() {
        let rules = AttendanceRules::default();
        let window = compute_window(&pagi(), &rules);
        let checked_in = checked_in_record("08:45:00");
        let mut checked_out = checked_in.clone();
        checked_out.check_out_time = NaiveTime::from_hms_opt(14, 5, 0);

        let at = |t: &str| make_datetime("2026-01-15", t);
        assert_eq!(attendance_state(at("08:00:00"), None, None), AttendanceState::NoSchedule);
        assert_eq!(
            attendance_state(at("08:00:00"), Some(&window), None),
            AttendanceState::AwaitingWindow
        );
        assert_eq!(
            attendance_state(at("08:30:00"), Some(&window), None),
            AttendanceState::CheckInOpen
        );
        assert_eq!(attendance_state(at("14:31:00"), Some(&window), None), AttendanceState::Expired);
        assert_eq!(
            attendance_state(at("10:00:00"), Some(&window), Some(&checked_in)),
            AttendanceState::CheckedIn
        );
        assert_eq!(
            attendance_state(at("14:00:00"), Some(&window), Some(&checked_in)),
            AttendanceState::CheckOutOpen
        );
        assert_eq!(
            attendance_state(at("14:31:00"), Some(&window), Some(&checked_in)),
            AttendanceState::Expired
        );
        assert_eq!(
            attendance_state(at("14:10:00"), Some(&window), Some(&checked_out)),
            AttendanceState::CheckedOut
        );
    }

    #[test]
    fn test_check_in_status_late_after_start() {
        let window = compute_window(&pagi(), &AttendanceRules::default());
        assert_eq!(
            check_in_status(make_datetime("2026-01-15", "09:00:00"), &window),
            AttendanceStatus::Present
        );
        assert_eq!(
            check_in_status(make_datetime("2026-01-15", "09:00:01"), &window),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn test_assess_builds_audit_trace() {
        let assessment = assess(
            make_datetime("2026-01-15", "08:40:00"),
            Some(&pagi()),
            &AttendanceRules::default(),
            None,
            &at_office(),
            DEFAULT_SHIFT_REMINDER_MINUTES,
        );

        assert!(assessment.availability.can_check_in);
        assert_eq!(assessment.state, AttendanceState::CheckInOpen);
        assert_eq!(assessment.check_in_status, Some(AttendanceStatus::Present));
        assert!(assessment.shift_starting_soon);

        let rule_ids: Vec<&str> = assessment
            .audit_trace
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec![
                "schedule_lookup",
                "schedule_window",
                "geofence",
                "check_in_eligibility",
                "check_out_eligibility"
            ]
        );
        assert_eq!(assessment.audit_trace[4].step_number, 5);
    }

    #[test]
    fn test_assess_without_shift() {
        let assessment = assess(
            make_datetime("2026-01-15", "08:40:00"),
            None,
            &AttendanceRules::default(),
            None,
            &at_office(),
            DEFAULT_SHIFT_REMINDER_MINUTES,
        );
        assert_eq!(assessment.state, AttendanceState::NoSchedule);
        assert_eq!(assessment.window, None);
        assert!(!assessment.shift_starting_soon);
        assert_eq!(assessment.audit_trace.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_idempotent(
            offset_minutes in -600i64..1200,
            meters in 0.0f64..500.0,
            checked_in in any::<bool>(),
            requires_geofence in any::<bool>(),
        ) {
            let rules = AttendanceRules { requires_geofence, ..AttendanceRules::default() };
            let now = make_datetime("2026-01-15", "09:00:00") + Duration::minutes(offset_minutes);
            let record = checked_in.then(|| checked_in_record("08:45:00"));
            let sample = north_of_office(meters);

            let first = evaluate(now, Some(&pagi()), &rules, record.as_ref(), &sample);
            let second = evaluate(now, Some(&pagi()), &rules, record.as_ref(), &sample);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_no_geofence_reason_when_disabled(
            offset_minutes in -600i64..1200,
            meters in 0.0f64..100_000.0,
        ) {
            let now = make_datetime("2026-01-15", "09:00:00") + Duration::minutes(offset_minutes);
            let result = evaluate(
                now,
                Some(&pagi()),
                &no_geofence(),
                None,
                &north_of_office(meters),
            );
            let geofence_reason = matches!(
                result.check_in_reason,
                Some(IneligibilityReason::OutsideGeofence { .. })
                    | Some(IneligibilityReason::AwaitingLocation)
                    | Some(IneligibilityReason::LocationUnavailable { .. })
            );
            prop_assert!(!geofence_reason);
        }
    }
}
