//! Weekly totals and payroll lines from attendance records.
//!
//! Worked time is the difference between check-out and check-in clock times.
//! A check-out earlier than the check-in is taken to be on the next day.
//! Records with a missing, malformed or non-positive duration contribute no
//! hours; they are not errors.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    AttendanceRecord, Employee, PayrollLine, PayrollReport, PayrollTotals, WeekSummary,
};

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: Decimal = Decimal::from_parts(3600, 0, 0, false, 0);

/// Default weekly target hours.
pub const DEFAULT_WEEKLY_TARGET_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Default hourly rate when an employee has none.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(20000, 0, 0, false, 0);

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Seconds worked on a record, or `None` when the record has no usable
/// duration.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::worked_seconds;
/// use attendance_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mut record = AttendanceRecord::new("emp_001", date);
/// record.check_in_time = NaiveTime::from_hms_opt(19, 0, 0);
/// record.check_out_time = NaiveTime::from_hms_opt(0, 30, 0);
///
/// assert_eq!(worked_seconds(&record), Some(5 * 3600 + 1800));
/// ```
pub fn worked_seconds(record: &AttendanceRecord) -> Option<i64> {
    let check_in = i64::from(record.check_in_time?.num_seconds_from_midnight());
    let mut check_out = i64::from(record.check_out_time?.num_seconds_from_midnight());
    if check_out < check_in {
        check_out += SECONDS_PER_DAY;
    }
    (check_out > check_in).then_some(check_out - check_in)
}

/// Hours worked on a record, rounded to 2 decimal places; zero when the
/// record has no usable duration.
pub fn worked_hours(record: &AttendanceRecord) -> Decimal {
    let seconds = worked_seconds(record).unwrap_or(0);
    round_half_up(Decimal::from(seconds) / SECONDS_PER_HOUR, 2)
}

/// Returns the Monday of the week containing `date`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::week_start;
/// use chrono::NaiveDate;
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(week_start(thursday), NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Summarizes hours, days and tips for the week beginning `week_start`.
///
/// # Arguments
///
/// * `records` - Attendance records, in any order
/// * `week_start` - First date of the week; earlier records are ignored
/// * `target_hours` - Weekly target carried into the summary
///
/// # Returns
///
/// A [`WeekSummary`] with hours rounded to 2 decimal places, the number of
/// distinct dates, and tips rounded to whole currency units.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{week_summary, DEFAULT_WEEKLY_TARGET_HOURS};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let summary = week_summary(&[], monday, DEFAULT_WEEKLY_TARGET_HOURS);
///
/// assert_eq!(summary.hours_worked, Decimal::ZERO);
/// assert_eq!(summary.days_worked, 0);
/// assert_eq!(summary.tips, Decimal::ZERO);
/// ```
pub fn week_summary(
    records: &[AttendanceRecord],
    week_start: NaiveDate,
    target_hours: Decimal,
) -> WeekSummary {
    let in_week: Vec<&AttendanceRecord> = records.iter().filter(|r| r.date >= week_start).collect();

    let seconds: i64 = in_week.iter().filter_map(|r| worked_seconds(r)).sum();
    let days: BTreeSet<NaiveDate> = in_week.iter().map(|r| r.date).collect();
    let tips: Decimal = in_week.iter().map(|r| r.tip).sum();

    WeekSummary {
        hours_worked: round_half_up(Decimal::from(seconds) / SECONDS_PER_HOUR, 2),
        days_worked: days.len() as u32,
        tips: round_half_up(tips, 0),
        target_hours,
    }
}

/// Computes pay for one record.
///
/// `base = round(hours * hourly_rate)` and `total = base + tip`. Zero or
/// negative rates are not rejected and flow through the arithmetic.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::payroll_line;
/// use attendance_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mut record = AttendanceRecord::new("emp_001", date);
/// record.check_in_time = NaiveTime::from_hms_opt(9, 0, 0);
/// record.check_out_time = NaiveTime::from_hms_opt(17, 0, 0);
/// record.tip = Decimal::new(5000, 0);
///
/// let line = payroll_line(&record, Decimal::new(20000, 0));
/// assert_eq!(line.base, Decimal::new(160000, 0));
/// assert_eq!(line.total, Decimal::new(165000, 0));
/// ```
pub fn payroll_line(record: &AttendanceRecord, hourly_rate: Decimal) -> PayrollLine {
    let hours = worked_hours(record);
    let base = round_half_up(hours * hourly_rate, 0);

    PayrollLine {
        employee_id: record.employee_id.clone(),
        date: record.date,
        hours,
        rate: hourly_rate,
        base,
        tip: record.tip,
        total: base + record.tip,
    }
}

/// Computes payroll lines for a set of records, with totals.
///
/// Each record is paid at its employee's own rate from `roster`, falling
/// back to `default_rate` for employees without one or missing from the
/// roster.
pub fn payroll_report(
    records: &[AttendanceRecord],
    roster: &[Employee],
    default_rate: Decimal,
) -> PayrollReport {
    let lines: Vec<PayrollLine> = records
        .iter()
        .map(|record| {
            let rate = roster
                .iter()
                .find(|e| e.id == record.employee_id)
                .map(|e| e.effective_hourly_rate(default_rate))
                .unwrap_or(default_rate);
            payroll_line(record, rate)
        })
        .collect();

    let totals = lines.iter().fold(PayrollTotals::default(), |acc, line| PayrollTotals {
        hours: acc.hours + line.hours,
        base: acc.base + line.base,
        tips: acc.tips + line.tip,
        total: acc.total + line.total,
    });

    PayrollReport { lines, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn record(date: &str, check_in: &str, check_out: &str, tip: &str) -> AttendanceRecord {
        let mut record = AttendanceRecord::new("emp_001", make_date(date));
        record.check_in_time = NaiveTime::parse_from_str(check_in, "%H:%M:%S").ok();
        record.check_out_time = NaiveTime::parse_from_str(check_out, "%H:%M:%S").ok();
        record.tip = dec(tip);
        record
    }

    #[test]
    fn test_overnight_duration_is_positive() {
        let r = record("2026-01-15", "19:00:00", "00:30:00", "0");
        assert_eq!(worked_hours(&r), dec("5.50"));
    }

    #[test]
    fn test_missing_times_contribute_nothing() {
        let r = record("2026-01-15", "09:00:00", "", "0");
        assert_eq!(worked_seconds(&r), None);
        assert_eq!(worked_hours(&r), Decimal::ZERO);
    }

    #[test]
    fn test_equal_times_contribute_nothing() {
        let r = record("2026-01-15", "09:00:00", "09:00:00", "0");
        assert_eq!(worked_seconds(&r), None);
    }

    #[test]
    fn test_week_start_is_monday() {
        assert_eq!(week_start(make_date("2026-01-12")), make_date("2026-01-12"));
        assert_eq!(week_start(make_date("2026-01-18")), make_date("2026-01-12"));
    }

    #[test]
    fn test_empty_week() {
        let summary = week_summary(&[], make_date("2026-01-12"), DEFAULT_WEEKLY_TARGET_HOURS);
        assert_eq!(summary.hours_worked, Decimal::ZERO);
        assert_eq!(summary.days_worked, 0);
        assert_eq!(summary.tips, Decimal::ZERO);
        assert_eq!(summary.target_hours, dec("40"));
    }

    #[test]
    fn test_week_summary_filters_and_counts_distinct_dates() {
        let records = vec![
            // previous week, ignored
            record("2026-01-09", "09:00:00", "14:00:00", "1000"),
            record("2026-01-12", "09:00:00", "14:00:00", "2500.4"),
            record("2026-01-12", "14:00:00", "19:00:00", "0"),
            record("2026-01-13", "19:00:00", "00:30:00", "1500"),
            // open record, counts as a day with no hours
            record("2026-01-14", "09:00:00", "", "0"),
        ];

        let summary = week_summary(&records, make_date("2026-01-12"), DEFAULT_WEEKLY_TARGET_HOURS);
        assert_eq!(summary.hours_worked, dec("15.50"));
        assert_eq!(summary.days_worked, 3);
        assert_eq!(summary.tips, dec("4000"));
    }

    #[test]
    fn test_hours_round_to_two_places() {
        // 7h 20m = 7.333... hours
        let records = vec![record("2026-01-12", "09:00:00", "16:20:00", "0")];
        let summary = week_summary(&records, make_date("2026-01-12"), DEFAULT_WEEKLY_TARGET_HOURS);
        assert_eq!(summary.hours_worked, dec("7.33"));
    }

    #[test]
    fn test_payroll_line_eight_hours() {
        let r = record("2026-01-15", "09:00:00", "17:00:00", "5000");
        let line = payroll_line(&r, DEFAULT_HOURLY_RATE);
        assert_eq!(line.hours, dec("8"));
        assert_eq!(line.base, dec("160000"));
        assert_eq!(line.tip, dec("5000"));
        assert_eq!(line.total, dec("165000"));
    }

    #[test]
    fn test_payroll_line_rounds_base() {
        // 1.01 h * 15555 = 15710.55
        let r = record("2026-01-15", "09:00:00", "10:00:36", "0");
        let line = payroll_line(&r, dec("15555"));
        assert_eq!(line.hours, dec("1.01"));
        assert_eq!(line.base, dec("15711"));
    }

    #[test]
    fn test_negative_rate_propagates() {
        let r = record("2026-01-15", "09:00:00", "10:00:00", "100");
        let line = payroll_line(&r, dec("-10"));
        assert_eq!(line.base, dec("-10"));
        assert_eq!(line.total, dec("90"));
    }

    #[test]
    fn test_payroll_report_uses_roster_rates() {
        let mut other = record("2026-01-15", "09:00:00", "11:00:00", "0");
        other.employee_id = "emp_002".to_string();
        let records = vec![record("2026-01-15", "09:00:00", "10:00:00", "500"), other];
        let roster = vec![Employee {
            id: "emp_002".to_string(),
            name: "Rina".to_string(),
            role: Role::Employee,
            hourly_rate: Some(dec("30000")),
        }];

        let report = payroll_report(&records, &roster, DEFAULT_HOURLY_RATE);
        assert_eq!(report.lines[0].rate, dec("20000"));
        assert_eq!(report.lines[1].rate, dec("30000"));
        assert_eq!(report.totals.hours, dec("3"));
        assert_eq!(report.totals.base, dec("80000"));
        assert_eq!(report.totals.tips, dec("500"));
        assert_eq!(report.totals.total, dec("80500"));
    }
}
