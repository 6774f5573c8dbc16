//! Employee roster entries and roles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::serde_helpers::id_string;

/// The role an account acts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff member.
    #[default]
    Employee,
    /// Manages schedules and verifies attendance.
    Supervisor,
    /// Owns the business and the attendance settings.
    Owner,
}

/// An employee as listed in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    #[serde(with = "id_string")]
    pub id: String,
    /// Display name.
    #[serde(default, alias = "nama")]
    pub name: String,
    /// The employee's account role.
    #[serde(default)]
    pub role: Role,
    /// Hourly pay rate, if the employee has one of their own.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl Employee {
    /// Returns the employee's hourly rate or the given default.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{Employee, Role};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Sari".to_string(),
    ///     role: Role::Employee,
    ///     hourly_rate: None,
    /// };
    /// assert_eq!(employee.effective_hourly_rate(Decimal::new(20000, 0)), Decimal::new(20000, 0));
    /// ```
    pub fn effective_hourly_rate(&self, default: Decimal) -> Decimal {
        self.hourly_rate.unwrap_or(default)
    }

    /// Returns true if the employee is a supervisor.
    pub fn is_supervisor(&self) -> bool {
        self.role == Role::Supervisor
    }
}
