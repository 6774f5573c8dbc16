//! Validation of proposed schedule entries.
//!
//! Client-side validation is advisory; the backend validates again on save.
//! A shift whose end time is earlier than its start time is accepted as an
//! overnight shift, consistent with the window and duration calculations.
//! Only equal start and end times are rejected.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    Employee, Role, ScheduledShift, ShiftKind, ValidationErrors, optional_id, parse_clock_time,
};

/// A schedule entry as entered in a form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    /// Target employee.
    #[serde(default, alias = "pegawai_id", deserialize_with = "optional_id")]
    pub employee_id: Option<String>,
    /// Shift name.
    #[serde(default)]
    pub shift: Option<String>,
    /// Date as `YYYY-MM-DD`.
    #[serde(default, alias = "tanggal")]
    pub date: Option<String>,
    /// Start time as `HH:MM` or `HH:MM:SS`.
    #[serde(default, alias = "jam_mulai")]
    pub start_time: Option<String>,
    /// End time as `HH:MM` or `HH:MM:SS`.
    #[serde(default, alias = "jam_selesai")]
    pub end_time: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parsed draft fields; `None` where the field failed validation.
struct ParsedDraft<'a> {
    employee_id: Option<&'a str>,
    shift: Option<ShiftKind>,
    date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

fn parse_draft<'a>(
    draft: &'a ScheduleDraft,
    today: NaiveDate,
    actor: Role,
    roster: &[Employee],
    errors: &mut ValidationErrors,
) -> ParsedDraft<'a> {
    let employee_id = match present(&draft.employee_id) {
        None => {
            errors.add("employee_id", "Employee is required.");
            None
        }
        Some(id) => match roster.iter().find(|e| e.id == id) {
            None if !roster.is_empty() => {
                errors.add("employee_id", "Employee not found.");
                None
            }
            Some(target) if actor == Role::Supervisor && target.is_supervisor() => {
                errors.add(
                    "employee_id",
                    "Supervisors cannot create or edit schedules for other supervisors.",
                );
                None
            }
            _ => Some(id),
        },
    };

    let shift = match present(&draft.shift) {
        None => {
            errors.add("shift", "Shift is required.");
            None
        }
        Some(name) => match name.parse::<ShiftKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.add("shift", "Shift must be one of Pagi, Siang or Malam.");
                None
            }
        },
    };

    let date = match present(&draft.date) {
        None => {
            errors.add("date", "Date is required.");
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Err(_) => {
                errors.add("date", "Date must be a valid date (YYYY-MM-DD).");
                None
            }
            Ok(date) if date < today => {
                errors.add("date", "Date cannot be in the past.");
                None
            }
            Ok(date) => Some(date),
        },
    };

    let mut time = |field: &str, label: &str, value: &Option<String>| match present(value) {
        None => {
            errors.add(field, format!("{} is required.", label));
            None
        }
        Some(raw) => {
            let parsed = parse_clock_time(raw);
            if parsed.is_none() {
                errors.add(field, format!("{} must be a valid time (HH:MM).", label));
            }
            parsed
        }
    };
    let start_time = time("start_time", "Start time", &draft.start_time);
    let end_time = time("end_time", "End time", &draft.end_time);

    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start == end {
            errors.add("end_time", "End time must differ from start time.");
        }
    }

    ParsedDraft {
        employee_id,
        shift,
        date,
        start_time,
        end_time,
    }
}

/// Validates a schedule draft.
///
/// All rules are checked independently, so several fields may fail at once.
///
/// # Arguments
///
/// * `draft` - The proposed entry
/// * `today` - The current date; earlier dates are rejected
/// * `actor` - The role of the account saving the entry
/// * `roster` - Known employees; when non-empty the target must be listed,
///   and a supervisor may not schedule another supervisor
///
/// # Returns
///
/// Field-keyed messages, empty when the draft is valid.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{validate_schedule, ScheduleDraft};
/// use attendance_engine::models::Role;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let draft = ScheduleDraft {
///     employee_id: Some("emp_001".to_string()),
///     shift: Some("Pagi".to_string()),
///     date: Some("2026-01-15".to_string()),
///     start_time: Some("09:00".to_string()),
///     end_time: Some("09:00".to_string()),
/// };
///
/// let errors = validate_schedule(&draft, today, Role::Owner, &[]);
/// assert_eq!(errors.get("end_time"), Some("End time must differ from start time."));
/// ```
pub fn validate_schedule(
    draft: &ScheduleDraft,
    today: NaiveDate,
    actor: Role,
    roster: &[Employee],
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    parse_draft(draft, today, actor, roster, &mut errors);
    errors
}

/// Validates a draft and converts it into a [`ScheduledShift`].
///
/// # Errors
///
/// Returns the validation messages when any rule fails.
pub fn validated_shift(
    draft: &ScheduleDraft,
    today: NaiveDate,
    actor: Role,
    roster: &[Employee],
) -> Result<ScheduledShift, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let parsed = parse_draft(draft, today, actor, roster, &mut errors);

    match parsed {
        ParsedDraft {
            employee_id: Some(employee_id),
            shift: Some(shift),
            date: Some(date),
            start_time: Some(start_time),
            end_time: Some(end_time),
        } if errors.is_empty() => Ok(ScheduledShift {
            employee_id: employee_id.to_string(),
            date,
            shift,
            start_time,
            end_time,
        }),
        _ => Err(errors),
    }
}
