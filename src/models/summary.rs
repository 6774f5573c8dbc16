//! Derived summaries: weekly totals, payroll lines and period reports.
//!
//! All of these are recomputed from attendance records and never stored.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Hours, days and tips for one week.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WeekSummary;
/// use rust_decimal::Decimal;
///
/// let summary = WeekSummary {
///     hours_worked: Decimal::new(30, 0),
///     days_worked: 4,
///     tips: Decimal::ZERO,
///     target_hours: Decimal::new(40, 0),
/// };
/// assert_eq!(summary.progress_percent(), Decimal::new(75, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Hours worked, rounded to 2 decimal places.
    pub hours_worked: Decimal,
    /// Number of distinct dates with a record.
    pub days_worked: u32,
    /// Sum of tips, rounded to whole currency units.
    pub tips: Decimal,
    /// Weekly target hours.
    pub target_hours: Decimal,
}

impl WeekSummary {
    /// Progress towards the target as a whole percentage, capped at 100.
    ///
    /// A zero target reports zero progress.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_hours <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let percent = (self.hours_worked / self.target_hours * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        percent.min(Decimal::ONE_HUNDRED)
    }
}

/// Pay for one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollLine {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Hours worked, rounded to 2 decimal places.
    pub hours: Decimal,
    /// The hourly rate applied.
    pub rate: Decimal,
    /// `hours * rate`, rounded to whole currency units.
    pub base: Decimal,
    /// Tip recorded on the record.
    pub tip: Decimal,
    /// `base + tip`.
    pub total: Decimal,
}

/// Totals across all lines of a payroll report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of line hours.
    pub hours: Decimal,
    /// Sum of line base pay.
    pub base: Decimal,
    /// Sum of tips.
    pub tips: Decimal,
    /// Sum of line totals.
    pub total: Decimal,
}

/// Payroll lines for a set of records, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// One line per record, in input order.
    pub lines: Vec<PayrollLine>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
}

/// Attendance statistics over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// First date of the range (inclusive).
    pub from: NaiveDate,
    /// Last date of the range (inclusive).
    pub to: NaiveDate,
    /// Records inside the range.
    pub records: u32,
    /// Records marked present (`Hadir`).
    pub present: u32,
    /// Records marked late (`Terlambat`).
    pub late: u32,
    /// Excused and unexcused absences.
    pub absent: u32,
    /// Hours worked beyond the daily ordinary hours, summed, 2 decimal places.
    pub overtime_hours: Decimal,
    /// Average attendance score, 0 to 100.
    pub attendance_score: Decimal,
    /// Average per-record productivity, 0 to 100.
    pub productivity: Decimal,
    /// Scores per date, ascending.
    pub days: Vec<DayScore>,
}

/// Attendance and productivity scores for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayScore {
    /// The date.
    pub date: NaiveDate,
    /// Average attendance score of the date's records.
    pub attendance_score: Decimal,
    /// Average productivity of the date's records.
    pub productivity: Decimal,
}
