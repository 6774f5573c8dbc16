//! The attendance backend collaborator.
//!
//! The backend owns employees, schedules, settings and attendance records.
//! [`AttendanceClient`] wraps any [`AttendanceBackend`] with a bounded
//! timeout, logging, and mapping of failures into [`EngineError`].

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculation::{ScheduleDraft, validated_shift};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, AttendanceRules, AttendanceStatus, Coordinate, Employee, Role,
    ScheduledShift, SettingsPayload, ValidationErrors,
};

/// Message shown when a failure carries no backend message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// A failure reported by a backend implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The backend refused the request, optionally with a message.
    #[error("rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// The backend's message, if it sent one.
        message: Option<String>,
    },
    /// The backend refused the request with field-level messages.
    #[error("field errors: {}", .0.summary())]
    FieldErrors(ValidationErrors),
    /// The request did not reach the backend or the response was unreadable.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A check-in request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInSubmission {
    /// The employee checking in.
    pub employee_id: String,
    /// Where the employee is, when known.
    pub location: Option<Coordinate>,
    /// Reference to a proof photo, if one was taken.
    pub proof_photo: Option<String>,
    /// Status computed at submission time.
    pub status: AttendanceStatus,
}

/// A check-out request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutSubmission {
    /// The employee checking out.
    pub employee_id: String,
    /// Where the employee is, when known.
    pub location: Option<Coordinate>,
    /// Tip received during the shift.
    pub tip: Option<Decimal>,
}

/// The endpoints the engine consumes.
#[async_trait]
pub trait AttendanceBackend: Send + Sync {
    /// Fetches the raw attendance settings.
    async fn settings(&self) -> Result<SettingsPayload, BackendError>;

    /// Fetches the shift for an employee on a date, if any.
    async fn schedule(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ScheduledShift>, BackendError>;

    /// Fetches an employee's attendance records.
    async fn attendance_records(
        &self,
        employee_id: &str,
    ) -> Result<Vec<AttendanceRecord>, BackendError>;

    /// Submits a check-in and returns the updated record.
    async fn check_in(
        &self,
        submission: &CheckInSubmission,
    ) -> Result<AttendanceRecord, BackendError>;

    /// Submits a check-out and returns the updated record.
    async fn check_out(
        &self,
        submission: &CheckOutSubmission,
    ) -> Result<AttendanceRecord, BackendError>;

    /// Creates or updates a schedule entry.
    async fn save_schedule(&self, shift: &ScheduledShift) -> Result<ScheduledShift, BackendError>;
}

/// Calls the backend with a timeout and maps failures to [`EngineError`].
///
/// Calls are made once; a failure or timeout is reported, never retried.
pub struct AttendanceClient<B> {
    backend: B,
    timeout: Duration,
    default_rules: AttendanceRules,
}

impl<B: AttendanceBackend> AttendanceClient<B> {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `backend` - The backend implementation
    /// * `timeout` - Upper bound for each call
    /// * `default_rules` - Rules used for settings the backend omits
    pub fn new(backend: B, timeout: Duration, default_rules: AttendanceRules) -> Self {
        Self {
            backend,
            timeout,
            default_rules,
        }
    }

    /// Returns the wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    async fn call<T, F>(&self, operation: &str, request: F) -> EngineResult<T>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.timeout, request).await;
        let elapsed_us = started.elapsed().as_micros() as u64;

        match outcome {
            Ok(Ok(value)) => {
                debug!(operation, elapsed_us, "backend call succeeded");
                Ok(value)
            }
            Ok(Err(error)) => {
                warn!(operation, elapsed_us, error = %error, "backend call failed");
                Err(map_backend_error(operation, error))
            }
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "backend call timed out"
                );
                Err(EngineError::SubmissionTimeout {
                    operation: operation.to_string(),
                    seconds: self.timeout.as_secs(),
                })
            }
        }
    }

    /// Fetches the settings and reads them into rules, falling back to the
    /// defaults for anything missing or malformed.
    pub async fn fetch_rules(&self) -> EngineResult<AttendanceRules> {
        let payload = self.call("settings fetch", self.backend.settings()).await?;
        Ok(AttendanceRules::from_settings(&payload, &self.default_rules))
    }

    /// Fetches an employee's shift on a date.
    pub async fn fetch_schedule(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> EngineResult<Option<ScheduledShift>> {
        self.call("schedule fetch", self.backend.schedule(employee_id, date))
            .await
    }

    /// Fetches an employee's attendance records.
    pub async fn fetch_records(&self, employee_id: &str) -> EngineResult<Vec<AttendanceRecord>> {
        self.call("records fetch", self.backend.attendance_records(employee_id))
            .await
    }

    /// Submits a check-in.
    pub async fn check_in(&self, submission: &CheckInSubmission) -> EngineResult<AttendanceRecord> {
        let record = self.call("check-in", self.backend.check_in(submission)).await?;
        info!(
            employee_id = %submission.employee_id,
            status = %submission.status,
            "check-in recorded"
        );
        Ok(record)
    }

    /// Submits a check-out.
    pub async fn check_out(
        &self,
        submission: &CheckOutSubmission,
    ) -> EngineResult<AttendanceRecord> {
        let record = self.call("check-out", self.backend.check_out(submission)).await?;
        info!(employee_id = %submission.employee_id, "check-out recorded");
        Ok(record)
    }

    /// Validates a schedule draft locally, then saves it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rejected`] without calling the backend when the
    /// draft is invalid, and the backend's own rejection otherwise.
    pub async fn save_schedule(
        &self,
        draft: &ScheduleDraft,
        today: NaiveDate,
        actor: Role,
        roster: &[Employee],
    ) -> EngineResult<ScheduledShift> {
        let shift = validated_shift(draft, today, actor, roster).map_err(|errors| {
            EngineError::Rejected {
                operation: "schedule save".to_string(),
                errors,
            }
        })?;
        self.call("schedule save", self.backend.save_schedule(&shift))
            .await
    }
}

fn map_backend_error(operation: &str, error: BackendError) -> EngineError {
    match error {
        BackendError::FieldErrors(errors) => EngineError::Rejected {
            operation: operation.to_string(),
            errors,
        },
        BackendError::Rejected {
            message: Some(message),
        } if !message.trim().is_empty() => EngineError::Submission {
            operation: operation.to_string(),
            message,
        },
        BackendError::Rejected { .. } | BackendError::Transport(_) => EngineError::Submission {
            operation: operation.to_string(),
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        },
    }
}
