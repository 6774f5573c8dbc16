//! Attendance and productivity statistics over a date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::aggregation::worked_seconds;
use crate::models::{AttendanceRecord, AttendanceStatus, DayScore, PeriodSummary};

/// Default ordinary hours per day; time beyond this counts as overtime.
pub const DEFAULT_DAILY_ORDINARY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Worked minutes that count as a fully productive day.
const FULL_DAY_MINUTES: Decimal = Decimal::from_parts(480, 0, 0, false, 0);

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Productivity of one record: worked minutes against a full day, as a
/// whole percentage capped at 100.
fn productivity(record: &AttendanceRecord) -> Decimal {
    let minutes = Decimal::from(worked_seconds(record).unwrap_or(0) / 60);
    round_whole(minutes / FULL_DAY_MINUTES * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED)
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        round_whole(total / Decimal::from(count as u64))
    }
}

/// Summarizes attendance between two dates, both inclusive.
///
/// A reversed range is swapped. Attendance scores are 100 for present, 70
/// for late, 30 for excused and 0 otherwise; productivity is worked minutes
/// against an 8 hour day, capped at 100 per record. Both are averaged over
/// the records in range and reported overall and per date.
///
/// # Arguments
///
/// * `records` - Attendance records, in any order
/// * `from` - First date of the range
/// * `to` - Last date of the range
/// * `daily_ordinary_hours` - Hours per record beyond which time is overtime
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{summarize_period, DEFAULT_DAILY_ORDINARY_HOURS};
/// use attendance_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mut record = AttendanceRecord::new("emp_001", date);
/// record.check_in_time = NaiveTime::from_hms_opt(8, 0, 0);
/// record.check_out_time = NaiveTime::from_hms_opt(18, 0, 0);
/// record.status = AttendanceStatus::Present;
///
/// let summary = summarize_period(&[record], date, date, DEFAULT_DAILY_ORDINARY_HOURS);
/// assert_eq!(summary.present, 1);
/// assert_eq!(summary.overtime_hours, Decimal::new(2, 0));
/// assert_eq!(summary.productivity, Decimal::ONE_HUNDRED);
/// ```
pub fn summarize_period(
    records: &[AttendanceRecord],
    from: NaiveDate,
    to: NaiveDate,
    daily_ordinary_hours: Decimal,
) -> PeriodSummary {
    let (from, to) = if from <= to { (from, to) } else { (to, from) };
    let in_range: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.date >= from && r.date <= to)
        .collect();

    let count_status = |status: AttendanceStatus| {
        in_range.iter().filter(|r| r.status == status).count() as u32
    };

    let overtime: Decimal = in_range
        .iter()
        .map(|r| {
            let worked = Decimal::from(worked_seconds(r).unwrap_or(0)) / Decimal::from(3600i64);
            (worked - daily_ordinary_hours).max(Decimal::ZERO)
        })
        .sum();

    let mut per_day: BTreeMap<NaiveDate, (Decimal, Decimal, usize)> = BTreeMap::new();
    for record in &in_range {
        let entry = per_day
            .entry(record.date)
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += Decimal::from(record.status.attendance_score());
        entry.1 += productivity(record);
        entry.2 += 1;
    }

    let score_total: Decimal = per_day.values().map(|(score, _, _)| *score).sum();
    let productivity_total: Decimal = per_day.values().map(|(_, p, _)| *p).sum();

    PeriodSummary {
        from,
        to,
        records: in_range.len() as u32,
        present: count_status(AttendanceStatus::Present),
        late: count_status(AttendanceStatus::Late),
        absent: in_range.iter().filter(|r| r.status.is_absence()).count() as u32,
        overtime_hours: overtime
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        attendance_score: average(score_total, in_range.len()),
        productivity: average(productivity_total, in_range.len()),
        days: per_day
            .into_iter()
            .map(|(date, (score, prod, count))| DayScore {
                date,
                attendance_score: average(score, count),
                productivity: average(prod, count),
            })
            .collect(),
    }
}
