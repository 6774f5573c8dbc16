//! Check-in/check-out availability as computed by the eligibility engine.
//!
//! Everything here is transient: recomputed on every clock tick, location
//! sample or record refresh, and never persisted.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::location::LocationError;

/// Why an action is not currently available.
///
/// Reasons are data, not errors; the caller displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// No shift is scheduled today.
    NoShiftScheduled,
    /// A check-in already exists for today.
    AlreadyCheckedIn,
    /// The geofence is enforced and no location sample has arrived yet.
    AwaitingLocation,
    /// The geofence is enforced and the device could not provide a location.
    LocationUnavailable {
        /// The device failure.
        error: LocationError,
    },
    /// The location is outside the geofence.
    OutsideGeofence {
        /// Distance to the office in meters.
        distance_meters: f64,
        /// Allowed radius in meters.
        radius_meters: f64,
    },
    /// The check-in window has closed.
    CheckInClosed {
        /// When the window closed.
        deadline: NaiveDateTime,
    },
    /// The check-in window has not opened yet.
    CheckInNotYetOpen {
        /// Whole minutes until it opens, rounded up.
        minutes_remaining: i64,
    },
    /// The check-out deadline has passed.
    CheckOutDeadlinePassed {
        /// When check-out closed.
        deadline: NaiveDateTime,
    },
    /// Check-out needs a check-in first.
    NotCheckedIn,
    /// Check-out opens at shift end.
    CheckOutNotYetAvailable {
        /// When check-out becomes available.
        available_at: NaiveDateTime,
    },
    /// A check-out already exists for today.
    AlreadyCheckedOut,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::NoShiftScheduled => write!(f, "No shift scheduled today."),
            IneligibilityReason::AlreadyCheckedIn => write!(f, "Already checked in today."),
            IneligibilityReason::AwaitingLocation => write!(f, "Awaiting location."),
            IneligibilityReason::LocationUnavailable { error } => {
                write!(f, "Location unavailable: {}.", error)
            }
            IneligibilityReason::OutsideGeofence {
                distance_meters,
                radius_meters,
            } => write!(
                f,
                "You are {:.0} m from the office; the allowed radius is {:.0} m.",
                distance_meters, radius_meters
            ),
            IneligibilityReason::CheckInClosed { deadline } => {
                write!(f, "Check-in closed at {}.", deadline.format("%H:%M"))
            }
            IneligibilityReason::CheckInNotYetOpen { minutes_remaining } => {
                if *minutes_remaining <= 1 {
                    write!(f, "Check-in opens shortly.")
                } else {
                    write!(f, "Check-in opens in {} minutes.", minutes_remaining)
                }
            }
            IneligibilityReason::CheckOutDeadlinePassed { deadline } => {
                write!(f, "Check-out deadline passed ({}).", deadline.format("%H:%M"))
            }
            IneligibilityReason::NotCheckedIn => write!(f, "Check in before checking out."),
            IneligibilityReason::CheckOutNotYetAvailable { available_at } => write!(
                f,
                "Check-out is available after shift end ({}).",
                available_at.format("%H:%M")
            ),
            IneligibilityReason::AlreadyCheckedOut => write!(f, "Already checked out today."),
        }
    }
}

/// Whether check-in and check-out are currently permitted.
///
/// # Example
///
/// ```
/// use attendance_engine::models::CheckAvailability;
///
/// let availability = CheckAvailability::unavailable();
/// assert!(!availability.can_check_in);
/// assert!(!availability.can_check_out);
/// assert!(availability.reason.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckAvailability {
    /// Check-in may be submitted now.
    pub can_check_in: bool,
    /// Check-out may be submitted now.
    pub can_check_out: bool,
    /// The check-out action should be shown (checked in and inside the check-out window).
    pub show_check_out: bool,
    /// Why check-in is unavailable, if it is.
    pub check_in_reason: Option<IneligibilityReason>,
    /// Why check-out is unavailable, if it is.
    pub check_out_reason: Option<IneligibilityReason>,
    /// Message for the action the employee faces next; empty when there is nothing to say.
    pub reason: String,
    /// Distance to the office, when the geofence is enforced and a fix is available.
    pub distance_meters: Option<f64>,
}

impl CheckAvailability {
    /// Both actions unavailable with no reason, as when there is no shift today.
    pub fn unavailable() -> Self {
        Self {
            can_check_in: false,
            can_check_out: false,
            show_check_out: false,
            check_in_reason: None,
            check_out_reason: None,
            reason: String::new(),
            distance_meters: None,
        }
    }
}

/// Where an employee stands in today's attendance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    /// No shift is scheduled today.
    NoSchedule,
    /// The check-in window has not opened yet.
    AwaitingWindow,
    /// The check-in window is open and no check-in exists.
    CheckInOpen,
    /// Checked in, shift not yet over.
    CheckedIn,
    /// Checked in and inside the check-out window.
    CheckOutOpen,
    /// Checked out.
    CheckedOut,
    /// The window closed without the pending action.
    Expired,
}
