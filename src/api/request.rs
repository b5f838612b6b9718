//! Request types for the Pensum Engine API.
//!
//! Every endpoint receives the whole pensum aggregate, so rules evaluate
//! against one consistent snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AdditionalHoursFactor, Employee, ExamAdditionalHours, ModuleExamStaffing, Pensum, Reduction,
};

/// Request body for `POST /basic-threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicThresholdRequest {
    /// The employee to derive the threshold for.
    pub employee: Employee,
}

/// Request body for `POST /threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdRequest {
    /// The pensum to calculate.
    pub pensum: Pensum,
}

/// Request body for `POST /additional-hours/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalHoursValidationRequest {
    /// The pensum the entry belongs to, as currently stored.
    pub pensum: Pensum,
    /// The proposed entry. An `id` matching a stored entry is an update.
    pub entry: AdditionalHoursFactor,
}

/// Request body for `POST /exam-hours/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamHoursValidationRequest {
    /// The pensum the entry belongs to, as currently stored.
    pub pensum: Pensum,
    /// Portions recorded for the module across all staffers.
    pub staffing: ModuleExamStaffing,
    /// The proposed entry. An `id` matching a stored entry is an update.
    pub entry: ExamAdditionalHours,
}

/// Request body for `POST /reductions/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionValidationRequest {
    /// The pensum the reduction belongs to, as currently stored.
    pub pensum: Pensum,
    /// The proposed reduction.
    pub reduction: Reduction,
}

/// Request body for `POST /workload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRequest {
    /// The pensum to summarize.
    pub pensum: Pensum,
    /// Class hours planned in the schedule.
    pub planned_hours: Decimal,
}
