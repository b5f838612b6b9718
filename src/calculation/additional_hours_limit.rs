//! Additional-hours limit validation.
//!
//! A proposed additional-hours entry is checked against up to four caps:
//!
//! 1. **Factor total**: the summed hours of same-named entries must stay
//!    within the factor's limit (ungrouped factors only)
//! 2. **Per-unit cap**: `value_per_unit` must not exceed the factor's
//!    maximum
//! 3. **Overtime allowance**: counted hours must fit in the remaining
//!    allowance
//! 4. **Group annual limit**: the summed `amount` of a group's entries must
//!    stay within the group's cap (grouped factors only)
//!
//! The caps are evaluated independently on exact values. Every breach is
//! collected and the one permitting the fewest credited hours is surfaced.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{AdditionalHoursFactorRule, PensumConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdditionalHoursFactor, LimitRule, LimitViolation, LimitedField, Pensum, Validation,
};

use super::integrity::validate_additional_hours_entry;
use super::overtime::{Excluding, overtime_budget};
use super::{entry_hours, floor_maximum, total_hours};

/// Validates a proposed additional-hours entry against a pensum.
///
/// When `entry.id` matches a stored entry, the stored entry is treated as
/// being replaced: its prior hours count toward none of the caps.
///
/// # Errors
///
/// - `InvalidEntry` if `value_per_unit` or `amount` is negative
/// - `AdditionalHoursFactorNotFound` if the entry, or any stored entry, names
///   an unconfigured factor
/// - threshold errors from the overtime budget
/// - `CalculationError` if the entry's or the stored entries' hours overflow
pub fn validate_additional_hours(
    pensum: &Pensum,
    entry: &AdditionalHoursFactor,
    config: &PensumConfig,
) -> EngineResult<Validation> {
    validate_additional_hours_entry(entry)?;
    let rule = config.factor_rule(&entry.name)?;
    let hours = entry_hours(entry)?;
    let mut violations = Vec::new();

    if rule.group.is_none() {
        if let Some(limit) = &rule.limit {
            let yearly = limit.yearly();
            let others = total_hours(
                other_entries(pensum, entry).filter(|other| other.name == entry.name),
            )?;
            let available = (yearly - others).max(Decimal::ZERO);

            if hours > available {
                violations.push(value_per_unit_violation(
                    LimitRule::FactorTotalLimit,
                    entry,
                    available,
                    format!(
                        "{} hours of {} would exceed the yearly limit of {} hours ({} already credited)",
                        hours.normalize(),
                        rule.description,
                        yearly.normalize(),
                        others.normalize()
                    ),
                ));
            }
        }
    }

    if entry.value_per_unit > rule.max_value_per_unit {
        violations.push(LimitViolation {
            rule: LimitRule::PerUnitCap,
            field: LimitedField::ValuePerUnit,
            maximum: rule.max_value_per_unit,
            max_credited_hours: rule
                .max_value_per_unit
                .checked_mul(entry.amount)
                .ok_or_else(|| EngineError::overflow("per-unit cap hours"))?,
            reason: format!(
                "Value per unit {} exceeds the maximum of {} for {}",
                entry.value_per_unit.normalize(),
                rule.max_value_per_unit.normalize(),
                rule.description
            ),
        });
    }

    if rule.counts_toward_overtime {
        let budget = overtime_budget(pensum, config, Excluding::AdditionalHours(entry.id.as_str()))?;
        let available = budget.available();

        if hours > available {
            violations.push(value_per_unit_violation(
                LimitRule::OvertimeAllowance,
                entry,
                available,
                format!(
                    "{} hours exceed the remaining overtime allowance of {} hours",
                    hours.normalize(),
                    available.normalize()
                ),
            ));
        }
    }

    if let Some(group_key) = &rule.group {
        let group = config.factor_group(group_key)?;
        let mut others = Decimal::ZERO;
        for other in other_entries(pensum, entry) {
            if in_group(config.factor_rule(&other.name)?, group_key) {
                others = others
                    .checked_add(other.amount)
                    .ok_or_else(|| EngineError::overflow("group amount total"))?;
            }
        }
        let available = (group.max_amount_per_year - others).max(Decimal::ZERO);

        if entry.amount > available {
            let maximum = floor_maximum(available);
            violations.push(LimitViolation {
                rule: LimitRule::GroupAnnualLimit,
                field: LimitedField::Amount,
                maximum,
                max_credited_hours: maximum
                    .checked_mul(entry.value_per_unit)
                    .ok_or_else(|| EngineError::overflow("group limit hours"))?,
                reason: format!(
                    "Amount {} would exceed the annual limit of {} for {} ({} already recorded)",
                    entry.amount.normalize(),
                    group.max_amount_per_year.normalize(),
                    group.description,
                    others.normalize()
                ),
            });
        }
    }

    let validation = Validation::from_checks(hours, violations);
    if let Some(violation) = validation.violation() {
        debug!(
            pensum_id = %pensum.id,
            factor = %entry.name,
            update = pensum.additional_hours_entry(&entry.id).is_some(),
            rule = ?violation.rule,
            maximum = %violation.maximum,
            "Additional hours entry rejected"
        );
    }
    Ok(validation)
}

fn other_entries<'a>(
    pensum: &'a Pensum,
    entry: &'a AdditionalHoursFactor,
) -> impl Iterator<Item = &'a AdditionalHoursFactor> {
    pensum
        .additional_hours_factors
        .iter()
        .filter(move |other| other.id != entry.id)
}

fn in_group(rule: &AdditionalHoursFactorRule, group: &str) -> bool {
    rule.group.as_deref() == Some(group)
}

/// Builds a violation stated on `value_per_unit` from the hours still
/// available to the entry.
fn value_per_unit_violation(
    rule: LimitRule,
    entry: &AdditionalHoursFactor,
    available_hours: Decimal,
    reason: String,
) -> LimitViolation {
    let maximum = available_hours
        .checked_div(entry.amount)
        .map(floor_maximum)
        .unwrap_or(Decimal::ZERO);

    LimitViolation {
        rule,
        field: LimitedField::ValuePerUnit,
        maximum,
        max_credited_hours: maximum * entry.amount,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
    use crate::models::{Employee, EmployeeGroup, Rejection};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn load_config() -> PensumConfig {
        ConfigLoader::load("./config/pensum").unwrap().into_config()
    }

    fn entry(id: &str, name: &str, value_per_unit: &str, amount: &str) -> AdditionalHoursFactor {
        AdditionalHoursFactor {
            id: id.to_string(),
            name: name.to_string(),
            value_per_unit: dec(value_per_unit),
            amount: dec(amount),
        }
    }

    /// Research-and-teaching professor: allowance 180 × 0.25 = 45 hours.
    fn create_pensum(additional_hours_factors: Vec<AdditionalHoursFactor>) -> Pensum {
        Pensum {
            id: "p_001".to_string(),
            schedule_id: "2025/26".to_string(),
            employee: Employee {
                id: "emp_001".to_string(),
                group: EmployeeGroup::ResearchAndTeaching,
                position: "professor".to_string(),
                job_time: Decimal::ONE,
            },
            basic_threshold: dec("180"),
            reductions: vec![],
            threshold_factors: vec![],
            additional_hours_factors,
            exam_additional_hours: vec![],
        }
    }

    fn expect_rejection(validation: Validation) -> Rejection {
        match validation {
            Validation::Rejected(rejection) => rejection,
            Validation::Accepted { .. } => panic!("Expected rejection"),
        }
    }

    #[test]
    fn test_entry_within_all_caps_is_accepted() {
        let config = load_config();
        let pensum = create_pensum(vec![]);

        let validation =
            validate_additional_hours(&pensum, &entry("new", "field_trip", "8", "2"), &config)
                .unwrap();
        assert_eq!(
            validation,
            Validation::Accepted {
                credited_hours: dec("16")
            }
        );
    }

    #[test]
    fn test_factor_total_limit() {
        let config = load_config();
        // Student club supervision: 8 hours per year
        let pensum = create_pensum(vec![entry("a", "student_club_supervision", "4", "1")]);

        let rejection = expect_rejection(
            validate_additional_hours(
                &pensum,
                &entry("new", "student_club_supervision", "5", "1"),
                &config,
            )
            .unwrap(),
        );

        assert_eq!(rejection.violation.rule, LimitRule::FactorTotalLimit);
        assert_eq!(rejection.violation.field, LimitedField::ValuePerUnit);
        assert_eq!(rejection.violation.maximum, dec("4"));
        assert_eq!(rejection.violations.len(), 1);
    }

    #[test]
    fn test_semester_limit_applies_per_year() {
        let config = load_config();
        // Thesis review: 20 hours per semester, 40 per year
        let pensum = create_pensum(vec![entry("a", "thesis_review", "2", "15")]);

        let validation = validate_additional_hours(
            &pensum,
            &entry("new", "thesis_review", "2", "5"),
            &config,
        )
        .unwrap();
        assert!(validation.is_accepted());

        let rejection = expect_rejection(
            validate_additional_hours(&pensum, &entry("new", "thesis_review", "2", "6"), &config)
                .unwrap(),
        );
        assert_eq!(rejection.violation.rule, LimitRule::FactorTotalLimit);
        assert_eq!(rejection.violation.maximum, dec("1.66"));
        assert_eq!(rejection.violation.max_credited_hours, dec("9.96"));
    }

    #[test]
    fn test_per_unit_cap() {
        let config = load_config();
        let pensum = create_pensum(vec![]);

        let rejection = expect_rejection(
            validate_additional_hours(&pensum, &entry("new", "field_trip", "10", "1"), &config)
                .unwrap(),
        );

        assert_eq!(rejection.violation.rule, LimitRule::PerUnitCap);
        assert_eq!(rejection.violation.maximum, dec("8"));
        assert_eq!(rejection.violation.max_credited_hours, dec("8"));
    }

    #[test]
    fn test_overtime_allowance() {
        let config = load_config();
        // 20 of 45 allowance hours already consumed
        let pensum = create_pensum(vec![entry("a", "internship_coordination", "0.5", "40")]);

        let rejection = expect_rejection(
            validate_additional_hours(&pensum, &entry("new", "field_trip", "8", "4"), &config)
                .unwrap(),
        );

        assert_eq!(rejection.violation.rule, LimitRule::OvertimeAllowance);
        assert_eq!(rejection.violation.field, LimitedField::ValuePerUnit);
        assert_eq!(rejection.violation.maximum, dec("6.25"));
        assert_eq!(rejection.violation.max_credited_hours, dec("25"));
    }

    #[test]
    fn test_uncounted_factor_ignores_overtime_allowance() {
        let config = load_config();
        let pensum = create_pensum(vec![entry("a", "field_trip", "8", "5")]);

        // 40 of 45 hours consumed, but club supervision does not count
        let validation = validate_additional_hours(
            &pensum,
            &entry("new", "student_club_supervision", "4", "2"),
            &config,
        )
        .unwrap();
        assert!(validation.is_accepted());
    }

    #[test]
    fn test_group_annual_limit_sums_amounts_across_factors() {
        let config = load_config();
        // Thesis supervision group: 12 theses per year
        let pensum = create_pensum(vec![
            entry("a", "bachelor_thesis_supervision", "2", "8"),
            entry("b", "master_thesis_supervision", "1", "3"),
        ]);

        let rejection = expect_rejection(
            validate_additional_hours(
                &pensum,
                &entry("new", "bachelor_thesis_supervision", "1", "2"),
                &config,
            )
            .unwrap(),
        );

        assert_eq!(rejection.violation.rule, LimitRule::GroupAnnualLimit);
        assert_eq!(rejection.violation.field, LimitedField::Amount);
        assert_eq!(rejection.violation.maximum, dec("1"));
        assert_eq!(rejection.violation.max_credited_hours, dec("1"));
    }

    #[test]
    fn test_all_violations_collected_and_ties_resolved_in_order() {
        let config = load_config();
        let pensum = create_pensum(vec![]);

        // 50 hours: factor total allows 8 per unit, cap allows 8, allowance 9
        let rejection = expect_rejection(
            validate_additional_hours(&pensum, &entry("new", "field_trip", "10", "5"), &config)
                .unwrap(),
        );

        assert_eq!(rejection.violations.len(), 3);
        assert_eq!(rejection.violation.rule, LimitRule::FactorTotalLimit);
        assert_eq!(rejection.violation.maximum, dec("8"));
    }

    #[test]
    fn test_updating_entry_does_not_count_it_twice() {
        let config = load_config();
        let stored = entry("a", "student_club_supervision", "4", "1");
        let pensum = create_pensum(vec![
            stored.clone(),
            entry("b", "student_club_supervision", "4", "1"),
        ]);

        let validation = validate_additional_hours(&pensum, &stored, &config).unwrap();
        assert!(validation.is_accepted());
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let config = load_config();
        let pensum = create_pensum(vec![entry("a", "field_trip", "8", "5")]);

        let validation =
            validate_additional_hours(&pensum, &entry("new", "field_trip", "8", "0"), &config)
                .unwrap();
        assert_eq!(
            validation,
            Validation::Accepted {
                credited_hours: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_overflowing_hours_are_calculation_errors() {
        let config = load_config();
        let pensum = create_pensum(vec![]);

        let huge = entry("new", "field_trip", "79228162514264337593543950335", "2");
        match validate_additional_hours(&pensum, &huge, &config) {
            Err(EngineError::CalculationError { message }) => {
                assert_eq!(message, "additional hours entry 'new' overflows")
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }

        // A huge value on a single unit fits and is rejected by the caps
        let single = entry("new", "field_trip", "79228162514264337593543950335", "1");
        let rejection =
            expect_rejection(validate_additional_hours(&pensum, &single, &config).unwrap());
        assert_eq!(rejection.violation.field, LimitedField::ValuePerUnit);
        assert_eq!(rejection.violation.maximum, dec("8"));
    }

    #[test]
    fn test_overflowing_group_amounts_are_calculation_errors() {
        let config = load_config();
        let pensum = create_pensum(vec![
            entry("a", "bachelor_thesis_supervision", "0", "79228162514264337593543950335"),
            entry("b", "master_thesis_supervision", "0", "79228162514264337593543950335"),
        ]);

        let result = validate_additional_hours(
            &pensum,
            &entry("new", "bachelor_thesis_supervision", "1", "1"),
            &config,
        );
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_unknown_factor_is_configuration_error() {
        let config = load_config();
        let pensum = create_pensum(vec![]);

        match validate_additional_hours(&pensum, &entry("new", "moon_landing", "1", "1"), &config) {
            Err(EngineError::AdditionalHoursFactorNotFound { name }) => {
                assert_eq!(name, "moon_landing")
            }
            other => panic!("Expected AdditionalHoursFactorNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let config = load_config();
        let pensum = create_pensum(vec![]);

        match validate_additional_hours(&pensum, &entry("new", "field_trip", "8", "-1"), &config) {
            Err(EngineError::InvalidEntry { field, .. }) => assert_eq!(field, "amount"),
            other => panic!("Expected InvalidEntry, got {:?}", other),
        }
    }
}
