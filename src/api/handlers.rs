//! HTTP request handlers for the Pensum Engine API.
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
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    basic_threshold_for, calculate_threshold, summarize_workload, validate_additional_hours,
    validate_exam_hours, validate_reduction,
};
use crate::error::EngineError;
use crate::models::Validation;

use super::request::{
    AdditionalHoursValidationRequest, BasicThresholdRequest, ExamHoursValidationRequest,
    ReductionValidationRequest, ThresholdRequest, WorkloadRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, BasicThresholdResponse, HealthResponse, ReductionResponse,
    ThresholdReport,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/basic-threshold", post(basic_threshold_handler))
        .route("/threshold", post(threshold_handler))
        .route(
            "/additional-hours/validate",
            post(additional_hours_validation_handler),
        )
        .route("/exam-hours/validate", post(exam_hours_validation_handler))
        .route("/reductions/validate", post(reduction_validation_handler))
        .route("/workload", post(workload_handler))
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

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Accepted validations answer 200, rejections 422.
fn validation_response(correlation_id: Uuid, validation: Validation) -> Response {
    match &validation {
        Validation::Accepted { credited_hours } => {
            info!(
                correlation_id = %correlation_id,
                credited_hours = %credited_hours,
                "Entry accepted"
            );
            json_response(StatusCode::OK, validation)
        }
        Validation::Rejected(rejection) => {
            info!(
                correlation_id = %correlation_id,
                rule = ?rejection.violation.rule,
                maximum = %rejection.violation.maximum,
                "Entry rejected"
            );
            json_response(StatusCode::UNPROCESSABLE_ENTITY, validation)
        }
    }
}

/// Unwraps a JSON body, or answers 400 describing why it was refused.
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
            // Get the body text which contains the detailed error from serde
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
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for GET /health endpoint.
async fn health_handler() -> impl IntoResponse {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok".to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

/// Handler for POST /basic-threshold endpoint.
async fn basic_threshold_handler(
    State(state): State<AppState>,
    payload: Result<Json<BasicThresholdRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing basic threshold request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match basic_threshold_for(&request.employee, state.config()) {
        Ok(basic_threshold) => json_response(
            StatusCode::OK,
            BasicThresholdResponse {
                employee_id: request.employee.id,
                basic_threshold,
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /threshold endpoint.
///
/// Returns the calculated threshold with its audit steps.
async fn threshold_handler(
    State(state): State<AppState>,
    payload: Result<Json<ThresholdRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing threshold request");

    let pensum = match parse_body(correlation_id, payload) {
        Ok(request) => request.pensum,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    match calculate_threshold(&pensum, state.config()) {
        Ok(calculation) => {
            let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
            info!(
                correlation_id = %correlation_id,
                pensum_id = %pensum.id,
                calculated_threshold = %calculation.calculated_threshold,
                clamped = calculation.clamped,
                duration_us = duration_us,
                "Threshold calculated successfully"
            );
            json_response(
                StatusCode::OK,
                ThresholdReport {
                    calculation_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    pensum_id: pensum.id,
                    employee_id: pensum.employee.id,
                    calculation,
                    duration_us,
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /additional-hours/validate endpoint.
async fn additional_hours_validation_handler(
    State(state): State<AppState>,
    payload: Result<Json<AdditionalHoursValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing additional hours validation");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match validate_additional_hours(&request.pensum, &request.entry, state.config()) {
        Ok(validation) => validation_response(correlation_id, validation),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /exam-hours/validate endpoint.
async fn exam_hours_validation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExamHoursValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing exam hours validation");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match validate_exam_hours(
        &request.pensum,
        &request.staffing,
        &request.entry,
        state.config(),
    ) {
        Ok(validation) => validation_response(correlation_id, validation),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /reductions/validate endpoint.
async fn reduction_validation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReductionValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reduction validation");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match validate_reduction(&request.pensum, &request.reduction, state.config()) {
        Ok(hours) => json_response(
            StatusCode::OK,
            ReductionResponse {
                role: request.reduction.role,
                hours,
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /workload endpoint.
async fn workload_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkloadRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing workload request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match summarize_workload(&request.pensum, request.planned_hours, state.config()) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                pensum_id = %summary.pensum_id,
                balance = %summary.balance,
                "Workload summarized successfully"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}
