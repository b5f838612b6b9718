//! Exam-hours accounting.
//!
//! Administering a module's exam is credited per examined student. The
//! credit is shared among the staffers of the exam by portion; portions of
//! one module's exam never sum above 1.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ExamConfig, PensumConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ExamAdditionalHours, ExamType, LimitRule, LimitViolation, LimitedField, ModuleExamStaffing,
    Pensum, Validation,
};

use super::floor_maximum;
use super::integrity::validate_exam_entry;
use super::overtime::{Excluding, overtime_budget};

/// Returns the hours credited for a whole exam.
///
/// Exams with no more students than `minimum_students` are not credited.
///
/// # Examples
///
/// ```
/// use pensum_engine::calculation::exam_hours;
/// use pensum_engine::config::ExamConfig;
/// use pensum_engine::models::ExamType;
/// use rust_decimal::Decimal;
///
/// let exams = ExamConfig {
///     written_hours_per_student: Decimal::new(2, 1),
///     oral_hours_per_student: Decimal::new(3, 1),
///     minimum_students: 10,
/// };
///
/// assert_eq!(exam_hours(40, ExamType::Oral, &exams), Decimal::from(12));
/// assert_eq!(exam_hours(10, ExamType::Oral, &exams), Decimal::ZERO);
/// ```
pub fn exam_hours(students_number: u32, exam_type: ExamType, exams: &ExamConfig) -> Decimal {
    if students_number <= exams.minimum_students {
        return Decimal::ZERO;
    }
    Decimal::from(students_number) * exams.hours_per_student(exam_type)
}

/// Returns the hours an exam entry credits to its pensum.
///
/// # Errors
///
/// `CalculationError` if a stored portion overflows the credit.
pub fn credited_exam_hours(
    entry: &ExamAdditionalHours,
    exams: &ExamConfig,
) -> EngineResult<Decimal> {
    entry
        .portion
        .checked_mul(exam_hours(entry.students_number, entry.exam_type, exams))
        .ok_or_else(|| EngineError::overflow(&format!("exam hours entry '{}'", entry.id)))
}

/// Validates the portion of a proposed exam-hours entry.
///
/// Two independent caps apply:
///
/// - **Overtime allowance**: when the exam is credited and the entry would
///   credit more than it did before, the new credit must fit in the
///   remaining overtime allowance (the entry's prior credit is given back).
///   The stated maximum is the prior portion plus the largest increment that
///   fits, floored to two decimal places. It is never below the prior
///   portion and never above 1.
/// - **Portion sum**: the portions recorded for the module by every other
///   staffer plus the new portion must not exceed 1. The stated maximum is
///   the remaining headroom.
///
/// If both fail, the lower maximum is surfaced.
///
/// # Errors
///
/// - `InvalidEntry` if the portion lies outside [0, 1] or the staffing
///   belongs to another module
/// - configuration errors from the overtime budget
/// - `CalculationError` if stored entries or recorded portions overflow
pub fn validate_exam_hours(
    pensum: &Pensum,
    staffing: &ModuleExamStaffing,
    entry: &ExamAdditionalHours,
    config: &PensumConfig,
) -> EngineResult<Validation> {
    validate_exam_entry(entry)?;
    if staffing.module_id != entry.module_id {
        return Err(EngineError::InvalidEntry {
            field: "module_id".to_string(),
            message: format!(
                "staffing of module '{}' does not match entry module '{}'",
                staffing.module_id, entry.module_id
            ),
        });
    }

    let exams = config.exams();
    let whole_exam = exam_hours(entry.students_number, entry.exam_type, exams);
    let credited = entry.portion * whole_exam;
    let mut violations = Vec::new();

    if whole_exam > Decimal::ZERO {
        let prior = pensum.exam_entry(&entry.id);
        let prior_portion = prior.map(|prior| prior.portion).unwrap_or(Decimal::ZERO);
        let prior_credited = match prior {
            Some(prior) => credited_exam_hours(prior, exams)?,
            None => Decimal::ZERO,
        };
        let budget = overtime_budget(pensum, config, Excluding::ExamHours(&entry.id))?;
        let ceiling = budget.available().max(prior_credited);

        if credited > ceiling {
            let headroom_hours = ceiling
                .checked_sub(prior_credited)
                .ok_or_else(|| EngineError::overflow("exam hours headroom"))?;
            let increment = floor_maximum(headroom_hours / whole_exam);
            let maximum = prior_portion.saturating_add(increment).min(Decimal::ONE);
            violations.push(LimitViolation {
                rule: LimitRule::OvertimeAllowance,
                field: LimitedField::Portion,
                maximum,
                max_credited_hours: maximum * whole_exam,
                reason: format!(
                    "Crediting {} exam hours exceeds the remaining overtime allowance of {} hours",
                    credited.normalize(),
                    budget.available().normalize()
                ),
            });
        }
    }

    let recorded = staffing
        .portions_total_excluding(&entry.id)
        .ok_or_else(|| EngineError::overflow("recorded exam portions"))?;
    let headroom = Decimal::ONE.saturating_sub(recorded).max(Decimal::ZERO);
    if entry.portion > headroom {
        violations.push(LimitViolation {
            rule: LimitRule::PortionSum,
            field: LimitedField::Portion,
            maximum: headroom,
            max_credited_hours: headroom * whole_exam,
            reason: format!(
                "Exam portions for module {} would sum to {}, above 1",
                entry.module_id,
                recorded.saturating_add(entry.portion).normalize()
            ),
        });
    }

    let validation = Validation::from_checks(credited, violations);
    if let Some(violation) = validation.violation() {
        debug!(
            pensum_id = %pensum.id,
            module_id = %entry.module_id,
            rule = ?violation.rule,
            maximum = %violation.maximum,
            "Exam hours entry rejected"
        );
    }
    Ok(validation)
}
