//! Response types for the Pensum Engine API.
//!
//! This module defines the response bodies and the mapping of engine errors
//! to HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::ThresholdCalculation;
use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    fn configuration_inconsistency(error: &EngineError) -> Self {
        Self::with_details(
            "CONFIGURATION_INCONSISTENCY",
            error.to_string(),
            "The pensum references an entry missing from the rule tables",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        if error.is_configuration_inconsistency() {
            return ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::configuration_inconsistency(&error),
            };
        }

        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidEntry { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ENTRY",
                    format!("Invalid entry field '{}': {}", field, message),
                    "The entry contains a value outside its permitted domain",
                ),
            },
            EngineError::DuplicateEntry { entity, key } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_ENTRY",
                    format!("Duplicate {}: {}", entity, key),
                    format!("Only one {} may exist per key", entity),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::configuration_inconsistency(&other),
            },
        }
    }
}

/// Response body for `POST /basic-threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicThresholdResponse {
    /// The employee the threshold was derived for.
    pub employee_id: String,
    /// Nominal hours scaled by job time.
    pub basic_threshold: Decimal,
}

/// Response body for `POST /threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that performed the calculation.
    pub engine_version: String,
    /// The calculated pensum.
    pub pensum_id: String,
    /// The employee the pensum belongs to.
    pub employee_id: String,
    /// The threshold and its audit steps.
    pub calculation: ThresholdCalculation,
    /// Time taken, in microseconds.
    pub duration_us: u64,
}

/// Response body for `POST /reductions/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionResponse {
    /// The validated role.
    pub role: String,
    /// Hours the reduction subtracts from the basic threshold.
    pub hours: Decimal,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server runs.
    pub status: String,
    /// Version of the running engine.
    pub engine_version: String,
}
