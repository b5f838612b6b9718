//! Validation outcomes for proposed entries.
//!
//! A breached cap is not an error: validations return [`Validation`], which
//! is either accepted with the hours the entry would credit, or rejected
//! with the most restrictive [`LimitViolation`] and every violation found.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The cap that was breached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitRule {
    /// `value_per_unit` above the factor's per-unit cap.
    PerUnitCap,
    /// Same-named entries above the factor's yearly limit.
    FactorTotalLimit,
    /// Grouped entries' amounts above the group's annual cap.
    GroupAnnualLimit,
    /// Counted hours above the employee's remaining overtime allowance.
    OvertimeAllowance,
    /// Exam portions of one module above 1.
    PortionSum,
}

/// The field of the proposed entry the stated maximum applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedField {
    /// `AdditionalHoursFactor::value_per_unit`.
    ValuePerUnit,
    /// `AdditionalHoursFactor::amount`.
    Amount,
    /// `ExamAdditionalHours::portion`.
    Portion,
}

/// One breached bound with its maximum permissible value.
///
/// # Example
///
/// ```
/// use pensum_engine::models::{LimitRule, LimitViolation, LimitedField};
/// use rust_decimal::Decimal;
///
/// let violation = LimitViolation {
///     rule: LimitRule::PortionSum,
///     field: LimitedField::Portion,
///     maximum: Decimal::new(4, 1),
///     max_credited_hours: Decimal::from(8),
///     reason: "Exam portions for module mod_1 would exceed 1".to_string(),
/// };
/// assert_eq!(violation.maximum.to_string(), "0.4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitViolation {
    /// The breached cap.
    pub rule: LimitRule,
    /// The field `maximum` applies to.
    pub field: LimitedField,
    /// Largest value of `field` that satisfies the cap.
    pub maximum: Decimal,
    /// Hours the entry would credit with `field` set to `maximum`.
    pub max_credited_hours: Decimal,
    /// Human-readable explanation.
    pub reason: String,
}

/// A rejected entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// The most restrictive violation.
    pub violation: LimitViolation,
    /// Every violation found, in evaluation order.
    pub violations: Vec<LimitViolation>,
}

/// The outcome of validating a proposed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    /// The entry satisfies every cap.
    Accepted {
        /// Hours the entry credits.
        credited_hours: Decimal,
    },
    /// The entry breaches at least one cap.
    Rejected(Rejection),
}

impl Validation {
    /// Builds the outcome of a set of independent checks.
    ///
    /// With no violations the entry is accepted. Otherwise the violation
    /// permitting the fewest credited hours is surfaced; ties go to the
    /// lower maximum, then to evaluation order.
    pub fn from_checks(credited_hours: Decimal, violations: Vec<LimitViolation>) -> Self {
        let primary = violations.iter().reduce(|best, candidate| {
            let tighter = (candidate.max_credited_hours, candidate.maximum)
                < (best.max_credited_hours, best.maximum);
            if tighter { candidate } else { best }
        });

        match primary {
            None => Validation::Accepted { credited_hours },
            Some(violation) => Validation::Rejected(Rejection {
                violation: violation.clone(),
                violations,
            }),
        }
    }

    /// Returns true if the entry was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted { .. })
    }

    /// Returns the surfaced violation of a rejected entry.
    pub fn violation(&self) -> Option<&LimitViolation> {
        match self {
            Validation::Accepted { .. } => None,
            Validation::Rejected(rejection) => Some(&rejection.violation),
        }
    }
}
