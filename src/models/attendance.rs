//! Attendance records and statuses.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::location::Coordinate;
use super::serde_helpers::{id_string, lenient_clock_time, lenient_decimal};

/// The attendance status of a record.
///
/// Serialized with the backend's values: `Hadir`, `Terlambat`, `Izin`,
/// `Alpha` and `pending`. Unknown values read as [`AttendanceStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    /// Checked in on time (`Hadir`).
    Present,
    /// Checked in after shift start (`Terlambat`).
    Late,
    /// Excused absence (`Izin`).
    Excused,
    /// Unexcused absence (`Alpha`).
    Absent,
    /// Not yet determined.
    #[default]
    Pending,
}

impl AttendanceStatus {
    /// Returns the backend's wire value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Hadir",
            AttendanceStatus::Late => "Terlambat",
            AttendanceStatus::Excused => "Izin",
            AttendanceStatus::Absent => "Alpha",
            AttendanceStatus::Pending => "pending",
        }
    }

    /// Attendance score used in period summaries: 100 on time, 70 late,
    /// 30 excused, 0 otherwise.
    pub fn attendance_score(&self) -> u32 {
        match self {
            AttendanceStatus::Present => 100,
            AttendanceStatus::Late => 70,
            AttendanceStatus::Excused => 30,
            _ => 0,
        }
    }

    /// Returns true for excused and unexcused absences.
    pub fn is_absence(&self) -> bool {
        matches!(self, AttendanceStatus::Excused | AttendanceStatus::Absent)
    }
}

impl From<String> for AttendanceStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "Hadir" => AttendanceStatus::Present,
            "Terlambat" => AttendanceStatus::Late,
            "Izin" => AttendanceStatus::Excused,
            "Alpha" => AttendanceStatus::Absent,
            _ => AttendanceStatus::Pending,
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(status: AttendanceStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee's attendance on one date.
///
/// Created by a check-in (check-in time set) and completed by a check-out.
/// The backend keeps at most one record per employee and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    #[serde(with = "id_string", alias = "pegawai_id")]
    pub employee_id: String,
    /// The attendance date.
    #[serde(alias = "tanggal")]
    pub date: NaiveDate,
    /// Wall-clock check-in time; malformed values read as absent.
    #[serde(default, with = "lenient_clock_time", alias = "jam_masuk")]
    pub check_in_time: Option<NaiveTime>,
    /// Wall-clock check-out time; malformed values read as absent.
    #[serde(default, with = "lenient_clock_time", alias = "jam_keluar")]
    pub check_out_time: Option<NaiveTime>,
    /// Where the employee checked in, if reported.
    #[serde(default)]
    pub check_in_location: Option<Coordinate>,
    /// Attendance status.
    #[serde(default)]
    pub status: AttendanceStatus,
    /// Tip recorded at check-out; absent or non-numeric reads as zero.
    #[serde(default, with = "lenient_decimal")]
    pub tip: Decimal,
}

impl AttendanceRecord {
    /// Creates an empty record for an employee and date.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            check_in_time: None,
            check_out_time: None,
            check_in_location: None,
            status: AttendanceStatus::Pending,
            tip: Decimal::ZERO,
        }
    }

    /// Returns true if a check-in has been recorded.
    pub fn has_checked_in(&self) -> bool {
        self.check_in_time.is_some()
    }

    /// Returns true if a check-out has been recorded.
    pub fn has_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }

    /// The check-in instant on the record's date.
    pub fn check_in_instant(&self) -> Option<NaiveDateTime> {
        self.check_in_time.map(|t| self.date.and_time(t))
    }

    /// The check-out instant; on the following day when the clock time is
    /// earlier than the check-in time.
    pub fn check_out_instant(&self) -> Option<NaiveDateTime> {
        let out = self.date.and_time(self.check_out_time?);
        match self.check_in_time {
            Some(check_in) if self.check_out_time? < check_in => Some(out + Duration::days(1)),
            _ => Some(out),
        }
    }
}
