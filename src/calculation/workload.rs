//! Workload summary of a pensum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PensumConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::Pensum;

use super::overtime::{Excluding, overtime_budget};
use super::threshold::calculate_threshold;
use super::total_hours;

/// The hours an employee is planned to work against their threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSummary {
    /// The summarized pensum.
    pub pensum_id: String,
    /// The employee the pensum belongs to.
    pub employee_id: String,
    /// Threshold after reductions and factors.
    pub calculated_threshold: Decimal,
    /// Class hours planned in the schedule.
    pub planned_hours: Decimal,
    /// All credited additional hours.
    pub additional_hours: Decimal,
    /// Additional hours that consume the overtime allowance.
    pub counted_additional_hours: Decimal,
    /// Credited exam hours.
    pub exam_hours: Decimal,
    /// Planned plus additional plus exam hours.
    pub total_workload: Decimal,
    /// Total workload minus the calculated threshold.
    pub balance: Decimal,
    /// Positive part of the balance.
    pub overtime_hours: Decimal,
    /// Annual overtime allowance.
    pub overtime_allowance: Decimal,
    /// Allowance left after counted additional and exam hours.
    pub overtime_remaining: Decimal,
}

/// Summarizes the workload of a pensum.
///
/// # Errors
///
/// - `InvalidEntry` if `planned_hours` is negative
/// - threshold and configuration errors
/// - `CalculationError` if the summed hours overflow
pub fn summarize_workload(
    pensum: &Pensum,
    planned_hours: Decimal,
    config: &PensumConfig,
) -> EngineResult<WorkloadSummary> {
    if planned_hours < Decimal::ZERO {
        return Err(EngineError::invalid("planned_hours", "must not be negative"));
    }

    let threshold = calculate_threshold(pensum, config)?;
    let budget = overtime_budget(pensum, config, Excluding::Nothing)?;
    let additional_hours = total_hours(&pensum.additional_hours_factors)?;

    let total_workload = planned_hours
        .checked_add(additional_hours)
        .and_then(|total| total.checked_add(budget.exam_hours))
        .ok_or_else(|| EngineError::overflow("total workload"))?;
    let balance = total_workload
        .checked_sub(threshold.calculated_threshold)
        .ok_or_else(|| EngineError::overflow("workload balance"))?;

    debug!(
        pensum_id = %pensum.id,
        total_workload = %total_workload,
        balance = %balance,
        "Workload summarized"
    );

    Ok(WorkloadSummary {
        pensum_id: pensum.id.clone(),
        employee_id: pensum.employee.id.clone(),
        calculated_threshold: threshold.calculated_threshold,
        planned_hours,
        additional_hours,
        counted_additional_hours: budget.counted_additional_hours,
        exam_hours: budget.exam_hours,
        total_workload,
        balance,
        overtime_hours: balance.max(Decimal::ZERO),
        overtime_allowance: budget.allowance,
        overtime_remaining: budget.remaining,
    })
}
