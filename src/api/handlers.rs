//! HTTP request handlers for the attendance API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    assess, payroll_report, summarize_period, validate_rules_update, validate_schedule,
    validated_rules, week_start, week_summary,
};
use crate::error::EngineError;
use crate::models::{AttendanceRules, SettingsPayload};

use super::request::{
    EligibilityRequest, PayrollRequest, PeriodSummaryRequest, ScheduleValidationRequest,
    WeekSummaryRequest,
};
use super::response::{ApiError, ApiErrorResponse, ValidationOutcome};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/settings", get(settings_handler).put(update_settings_handler))
        .route("/settings/validate", post(validate_settings_handler))
        .route("/eligibility", post(eligibility_handler))
        .route("/summary/week", post(week_summary_handler))
        .route("/summary/period", post(period_summary_handler))
        .route("/payroll", post(payroll_handler))
        .route("/schedules/validate", post(validate_schedule_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Unwraps a JSON body or turns the rejection into a 400 response.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response())
}

/// Handler for GET /settings.
///
/// Returns the rules currently in force.
async fn settings_handler(State(state): State<AppState>) -> Response {
    let rules: AttendanceRules = state.rules().snapshot().as_ref().clone();
    json_response(StatusCode::OK, rules)
}

/// Handler for POST /eligibility.
///
/// Evaluates check-in/check-out availability for the supplied inputs and
/// returns it with the attendance state and audit trace.
async fn eligibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let started = Instant::now();
    let now = request.now.unwrap_or_else(|| state.clock().now());
    let rules = match &request.rules {
        Some(rules) => rules.clone(),
        None => state.rules().snapshot().as_ref().clone(),
    };
    let lead = request
        .reminder_minutes
        .unwrap_or(state.config().client().shift_reminder_minutes);

    let assessment = assess(
        now,
        request.shift.as_ref(),
        &rules,
        request.record.as_ref(),
        &request.location_sample(),
        lead,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = request.shift.as_ref().map(|s| s.employee_id.as_str()).unwrap_or("-"),
        state = ?assessment.state,
        can_check_in = assessment.availability.can_check_in,
        can_check_out = assessment.availability.can_check_out,
        duration_us = started.elapsed().as_micros() as u64,
        "Eligibility evaluated"
    );
    json_response(StatusCode::OK, assessment)
}

/// Handler for POST /summary/week.
async fn week_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeekSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let from = request
        .week_start
        .unwrap_or_else(|| week_start(state.clock().today()));
    let target = request
        .target_hours
        .unwrap_or(state.config().payroll().weekly_target_hours);
    let summary = week_summary(&request.records, from, target);

    info!(
        correlation_id = %correlation_id,
        records = request.records.len(),
        hours_worked = %summary.hours_worked,
        "Week summary computed"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /payroll.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let rate = request
        .hourly_rate
        .unwrap_or(state.config().payroll().default_hourly_rate);
    let report = payroll_report(&request.records, &request.roster, rate);
    info!(
        correlation_id = %correlation_id,
        lines = report.lines.len(),
        total = %report.totals.total,
        "Payroll report computed"
    );
    json_response(StatusCode::OK, report)
}

/// Handler for POST /summary/period.
async fn period_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let daily = request
        .daily_ordinary_hours
        .unwrap_or(state.config().payroll().daily_ordinary_hours);
    let summary = summarize_period(&request.records, request.from, request.to, daily);

    info!(
        correlation_id = %correlation_id,
        from = %summary.from,
        to = %summary.to,
        records = summary.records,
        "Period summary computed"
    );
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /schedules/validate.
///
/// Returns 200 when the draft is acceptable and 422 with field messages
/// otherwise.
async fn validate_schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let today = request.today.unwrap_or_else(|| state.clock().today());
    let errors = validate_schedule(&request.draft, today, request.actor, &request.roster);
    info!(
        correlation_id = %correlation_id,
        error_count = errors.len(),
        "Schedule draft validated"
    );

    let (status, outcome) = ValidationOutcome::from_errors(errors);
    json_response(status, outcome)
}

/// Handler for POST /settings/validate.
async fn validate_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettingsPayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let update = match parse_body(correlation_id, payload) {
        Ok(update) => update,
        Err(response) => return response,
    };

    let errors = validate_rules_update(&update, state.config().settings_bounds());
    info!(
        correlation_id = %correlation_id,
        error_count = errors.len(),
        "Settings update validated"
    );

    let (status, outcome) = ValidationOutcome::from_errors(errors);
    json_response(status, outcome)
}

/// Handler for PUT /settings.
///
/// Validates the update against the configured bounds and, when it passes,
/// replaces the rules snapshot used by later requests.
async fn update_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettingsPayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let update = match parse_body(correlation_id, payload) {
        Ok(update) => update,
        Err(response) => return response,
    };

    match validated_rules(&update, state.config().settings_bounds()) {
        Ok(rules) => {
            info!(
                correlation_id = %correlation_id,
                buffer_before_start = rules.buffer_before_start_minutes,
                buffer_after_end = rules.buffer_after_end_minutes,
                radius_m = rules.radius_meters,
                "Settings replaced"
            );
            state.rules().replace(rules.clone());
            json_response(StatusCode::OK, rules)
        }
        Err(errors) => {
            warn!(
                correlation_id = %correlation_id,
                error_count = errors.len(),
                "Settings update rejected"
            );
            ApiErrorResponse::from(EngineError::Rejected {
                operation: "settings update".to_string(),
                errors,
            })
            .into_response()
        }
    }
}
