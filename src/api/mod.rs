//! HTTP API module for the Pensum Engine.
//!
//! This module provides stateless REST endpoints that evaluate the pensum
//! rules against a pensum snapshot sent with each request.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AdditionalHoursValidationRequest, BasicThresholdRequest, ExamHoursValidationRequest,
    ReductionValidationRequest, ThresholdRequest, WorkloadRequest,
};
pub use response::{
    ApiError, BasicThresholdResponse, HealthResponse, ReductionResponse, ThresholdReport,
};
pub use state::AppState;
