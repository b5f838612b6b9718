//! Calculated threshold functionality.
//!
//! This module reduces a pensum's basic threshold by its role reductions and
//! then applies its threshold factors in stored order, recording every step
//! in an audit trail.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PensumConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, FactorKind, Pensum};

use super::integrity::validate_threshold_factor;

/// The result of calculating a pensum's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdCalculation {
    /// The basic threshold the calculation started from.
    pub basic_threshold: Decimal,
    /// Sum of all role reductions.
    pub reductions_total: Decimal,
    /// The required teaching hours after reductions and factors.
    pub calculated_threshold: Decimal,
    /// True if reductions consumed the whole basic threshold, in which case
    /// no threshold factor was applied.
    pub clamped: bool,
    /// One audit step per reduction and factor, plus the clamp if any.
    pub steps: Vec<AuditStep>,
}

/// Calculates the threshold of a pensum.
///
/// Starting from `basic_threshold`, each reduction's configured hours are
/// subtracted. If the result is zero or below, the threshold is clamped to
/// zero and the threshold factors are skipped. Otherwise each factor is
/// applied in stored order: additive factors add their value,
/// multiplicative factors multiply by it.
///
/// # Errors
///
/// - `ReductionRoleNotFound` if any reduction's role is not configured;
///   every reduction is looked up, even after the threshold reaches zero
/// - `InvalidEntry` for a negative basic threshold or factor value
/// - `CalculationError` on decimal overflow
///
/// # Examples
///
/// ```no_run
/// use pensum_engine::calculation::calculate_threshold;
/// use pensum_engine::config::ConfigLoader;
/// use pensum_engine::models::{
///     Employee, EmployeeGroup, FactorKind, Pensum, Reduction, ThresholdFactor,
/// };
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/pensum")?;
/// let pensum = Pensum {
///     id: "p_001".to_string(),
///     schedule_id: "2025/26".to_string(),
///     employee: Employee {
///         id: "emp_001".to_string(),
///         group: EmployeeGroup::ResearchAndTeaching,
///         position: "associate_professor".to_string(),
///         job_time: Decimal::ONE,
///     },
///     basic_threshold: Decimal::from(210),
///     reductions: vec![Reduction {
///         id: "r_1".to_string(),
///         role: "deputy_head_of_department".to_string(),
///     }],
///     threshold_factors: vec![ThresholdFactor {
///         id: "tf_1".to_string(),
///         kind: FactorKind::Multiplicative,
///         value: Decimal::new(5, 1),
///         description: None,
///     }],
///     additional_hours_factors: vec![],
///     exam_additional_hours: vec![],
/// };
///
/// let result = calculate_threshold(&pensum, loader.config())?;
/// assert_eq!(result.calculated_threshold, Decimal::from(90)); // (210 - 30) × 0.5
/// # Ok::<(), pensum_engine::error::EngineError>(())
/// ```
pub fn calculate_threshold(
    pensum: &Pensum,
    config: &PensumConfig,
) -> EngineResult<ThresholdCalculation> {
    if pensum.basic_threshold < Decimal::ZERO {
        return Err(EngineError::invalid(
            "basic_threshold",
            format!("must not be negative, got {}", pensum.basic_threshold),
        ));
    }

    let mut steps = Vec::new();
    let mut step_number: u32 = 1;
    let mut running = pensum.basic_threshold;
    let mut reductions_total = Decimal::ZERO;

    for reduction in &pensum.reductions {
        let role = config.reduction_role(&reduction.role)?;
        let before = running;
        running -= role.hours;
        reductions_total += role.hours;

        steps.push(AuditStep {
            step_number,
            rule_id: "reduction".to_string(),
            rule_name: "Role Reduction".to_string(),
            input: serde_json::json!({
                "threshold": before.normalize().to_string(),
                "role": reduction.role,
                "hours": role.hours.normalize().to_string()
            }),
            output: serde_json::json!({
                "threshold": running.normalize().to_string()
            }),
            reasoning: format!(
                "{} - {} ({}) = {}",
                before.normalize(),
                role.hours.normalize(),
                role.description,
                running.normalize()
            ),
        });
        step_number += 1;
    }

    if running <= Decimal::ZERO {
        debug!(
            pensum_id = %pensum.id,
            basic_threshold = %pensum.basic_threshold,
            reductions_total = %reductions_total,
            "Reductions consume the basic threshold, clamping to zero"
        );

        steps.push(AuditStep {
            step_number,
            rule_id: "threshold_clamp".to_string(),
            rule_name: "Threshold Clamp".to_string(),
            input: serde_json::json!({
                "threshold": running.normalize().to_string(),
                "skipped_factors": pensum.threshold_factors.len()
            }),
            output: serde_json::json!({
                "threshold": "0"
            }),
            reasoning: format!(
                "Reductions of {} reach the basic threshold of {}; threshold is 0 and {} factor(s) are skipped",
                reductions_total.normalize(),
                pensum.basic_threshold.normalize(),
                pensum.threshold_factors.len()
            ),
        });

        return Ok(ThresholdCalculation {
            basic_threshold: pensum.basic_threshold,
            reductions_total,
            calculated_threshold: Decimal::ZERO,
            clamped: true,
            steps,
        });
    }

    for factor in &pensum.threshold_factors {
        validate_threshold_factor(factor)?;
        let before = running;
        running = factor
            .apply(running)
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("threshold factor '{}' overflows", factor.id),
            })?;

        let (rule_id, rule_name, operator) = match factor.kind {
            FactorKind::Additive => ("additive_factor", "Additive Threshold Factor", "+"),
            FactorKind::Multiplicative => {
                ("multiplicative_factor", "Multiplicative Threshold Factor", "×")
            }
        };

        steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "threshold": before.normalize().to_string(),
                "factor_id": factor.id,
                "value": factor.value.normalize().to_string()
            }),
            output: serde_json::json!({
                "threshold": running.normalize().to_string()
            }),
            reasoning: format!(
                "{} {} {} = {}",
                before.normalize(),
                operator,
                factor.value.normalize(),
                running.normalize()
            ),
        });
        step_number += 1;
    }

    Ok(ThresholdCalculation {
        basic_threshold: pensum.basic_threshold,
        reductions_total,
        calculated_threshold: running,
        clamped: false,
        steps,
    })
}
