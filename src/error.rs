//! Error types for the Attendance Eligibility Engine.
//!
//! Only configuration loading and collaborator calls fail with an error.
//! Time-window, geofence, location and validation outcomes are returned as
//! data by the calculation modules.

use thiserror::Error;

use crate::models::{IneligibilityReason, ValidationErrors};

/// The main error type for the Attendance Eligibility Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is outside of its allowed range.
    #[error("Invalid settings field '{field}': {message}")]
    InvalidSettings {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The backend rejected a submission or could not be reached.
    #[error("{operation} failed: {message}")]
    Submission {
        /// The operation that was attempted (e.g. "check-in").
        operation: String,
        /// The backend's message, or a generic failure message.
        message: String,
    },

    /// A collaborator call did not answer within the configured timeout.
    #[error("{operation} timed out after {seconds}s")]
    SubmissionTimeout {
        /// The operation that was attempted.
        operation: String,
        /// The timeout that elapsed.
        seconds: u64,
    },

    /// The backend rejected a submission with field-level messages.
    #[error("{operation} rejected: {}", .errors.summary())]
    Rejected {
        /// The operation that was attempted.
        operation: String,
        /// Messages keyed by field.
        errors: ValidationErrors,
    },

    /// The action is not currently permitted; nothing was submitted.
    #[error("{operation} unavailable: {reason}")]
    ActionUnavailable {
        /// The operation that was attempted.
        operation: String,
        /// Why the action is unavailable.
        reason: IneligibilityReason,
    },

    /// A location response arrived after its request was superseded.
    #[error("Location response discarded: request was superseded")]
    LocationStale,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
