//! HTTP API module for the attendance engine.
//!
//! This module exposes eligibility, summaries, payroll and validation over
//! a small REST API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EligibilityRequest, PayrollRequest, PeriodSummaryRequest, ScheduleValidationRequest,
    WeekSummaryRequest,
};
pub use response::{ApiError, ApiErrorResponse, ValidationOutcome};
pub use state::AppState;
