//! Structural checks on pensum entries.
//!
//! These checks guard domains and uniqueness invariants. Unlike cap
//! breaches they are errors: the entry is malformed, not merely too large.

use rust_decimal::Decimal;

use crate::config::PensumConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdditionalHoursFactor, Employee, ExamAdditionalHours, Pensum, Reduction, ThresholdFactor,
};

/// Checks that the employee's job time lies in [0, 1].
pub fn validate_employee(employee: &Employee) -> EngineResult<()> {
    if employee.job_time < Decimal::ZERO || employee.job_time > Decimal::ONE {
        return Err(EngineError::invalid(
            "job_time",
            format!("must be between 0 and 1, got {}", employee.job_time),
        ));
    }
    Ok(())
}

/// Checks that a threshold factor's value is non-negative.
pub fn validate_threshold_factor(factor: &ThresholdFactor) -> EngineResult<()> {
    if factor.value < Decimal::ZERO {
        return Err(EngineError::invalid(
            "value",
            format!("threshold factor '{}' must not be negative", factor.id),
        ));
    }
    Ok(())
}

/// Checks that an additional-hours entry carries non-negative values.
pub fn validate_additional_hours_entry(entry: &AdditionalHoursFactor) -> EngineResult<()> {
    if entry.value_per_unit < Decimal::ZERO {
        return Err(EngineError::invalid("value_per_unit", "must not be negative"));
    }
    if entry.amount < Decimal::ZERO {
        return Err(EngineError::invalid("amount", "must not be negative"));
    }
    Ok(())
}

/// Checks that an exam entry's portion lies in [0, 1].
pub fn validate_exam_entry(entry: &ExamAdditionalHours) -> EngineResult<()> {
    if entry.portion < Decimal::ZERO || entry.portion > Decimal::ONE {
        return Err(EngineError::invalid(
            "portion",
            format!("must be between 0 and 1, got {}", entry.portion),
        ));
    }
    Ok(())
}

/// Validates a proposed reduction and returns the hours it is worth.
///
/// The role must be configured and no other reduction of the pensum may
/// hold the same role. Resubmitting a stored reduction unchanged is valid.
pub fn validate_reduction(
    pensum: &Pensum,
    reduction: &Reduction,
    config: &PensumConfig,
) -> EngineResult<Decimal> {
    let role = config.reduction_role(&reduction.role)?;

    let taken = pensum
        .reductions
        .iter()
        .any(|r| r.id != reduction.id && r.role == reduction.role);
    if taken {
        return Err(EngineError::DuplicateEntry {
            entity: "reduction".to_string(),
            key: reduction.role.clone(),
        });
    }

    Ok(role.hours)
}

/// Checks that no other pensum covers the candidate's schedule and employee.
pub fn ensure_unique_pensum(existing: &[Pensum], candidate: &Pensum) -> EngineResult<()> {
    let clash = existing
        .iter()
        .any(|p| p.id != candidate.id && p.same_slot(candidate));
    if clash {
        return Err(EngineError::DuplicateEntry {
            entity: "pensum".to_string(),
            key: format!("{}/{}", candidate.schedule_id, candidate.employee.id),
        });
    }
    Ok(())
}
