//! Overtime allowance accounting.
//!
//! An employee may be credited extra hours only up to an annual allowance:
//! a group-specific fraction of the calculated threshold. Counted
//! additional-hours entries and credited exam hours consume it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PensumConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::Pensum;

use super::entry_hours;
use super::exam_hours::credited_exam_hours;
use super::threshold::calculate_threshold;

/// The stored entry left out of a budget because it is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Excluding<'a> {
    /// Every stored entry counts.
    Nothing,
    /// Skip the additional-hours entry with this id.
    AdditionalHours(&'a str),
    /// Skip the exam-hours entry with this id.
    ExamHours(&'a str),
}

/// The state of an employee's overtime allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBudget {
    /// Annual overtime allowance.
    pub allowance: Decimal,
    /// Hours consumed by counted additional-hours entries.
    pub counted_additional_hours: Decimal,
    /// Hours consumed by credited exams.
    pub exam_hours: Decimal,
    /// Allowance minus consumed hours; negative once overdrawn.
    pub remaining: Decimal,
}

impl OvertimeBudget {
    /// Returns the hours consumed so far, or `None` on decimal overflow.
    pub fn consumed(&self) -> Option<Decimal> {
        self.counted_additional_hours.checked_add(self.exam_hours)
    }

    /// Returns the hours still available, never below zero.
    pub fn available(&self) -> Decimal {
        self.remaining.max(Decimal::ZERO)
    }
}

/// Computes the overtime budget of a pensum.
///
/// `excluding` names the entry under edit, whose prior contribution is
/// given back so that an update is not counted twice.
///
/// # Errors
///
/// Propagates threshold errors and `AdditionalHoursFactorNotFound` for a
/// stored entry with an unknown factor name. Returns `CalculationError` when
/// the stored entries overflow a decimal.
pub fn overtime_budget(
    pensum: &Pensum,
    config: &PensumConfig,
    excluding: Excluding<'_>,
) -> EngineResult<OvertimeBudget> {
    let threshold = calculate_threshold(pensum, config)?;
    let allowance = threshold
        .calculated_threshold
        .checked_mul(config.overtime_ratio(pensum.employee.group))
        .ok_or_else(|| EngineError::overflow("overtime allowance"))?;

    let mut counted_additional_hours = Decimal::ZERO;
    for entry in &pensum.additional_hours_factors {
        if excluding == Excluding::AdditionalHours(entry.id.as_str()) {
            continue;
        }
        if config.factor_rule(&entry.name)?.counts_toward_overtime {
            counted_additional_hours = counted_additional_hours
                .checked_add(entry_hours(entry)?)
                .ok_or_else(|| EngineError::overflow("counted additional hours"))?;
        }
    }

    let mut exam_hours = Decimal::ZERO;
    for entry in &pensum.exam_additional_hours {
        if excluding == Excluding::ExamHours(entry.id.as_str()) {
            continue;
        }
        exam_hours = exam_hours
            .checked_add(credited_exam_hours(entry, config.exams())?)
            .ok_or_else(|| EngineError::overflow("exam hours"))?;
    }

    let remaining = allowance
        .checked_sub(counted_additional_hours)
        .and_then(|remaining| remaining.checked_sub(exam_hours))
        .ok_or_else(|| EngineError::overflow("overtime remaining"))?;

    Ok(OvertimeBudget {
        allowance,
        counted_additional_hours,
        exam_hours,
        remaining,
    })
}
