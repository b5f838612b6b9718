//! Property tests for the threshold and limit rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use pensum_engine::calculation::{
    calculate_threshold, summarize_workload, validate_additional_hours, validate_exam_hours,
};
use pensum_engine::config::{ConfigLoader, PensumConfig};
use pensum_engine::error::{EngineError, EngineResult};
use pensum_engine::models::{
    AdditionalHoursFactor, Employee, EmployeeGroup, ExamAdditionalHours, ExamType, FactorKind,
    LimitedField, ModuleExamStaffing, Pensum, Reduction, StaffPortion, ThresholdFactor, Validation,
};

const ROLES: &[&str] = &[
    "rector",
    "vice_rector",
    "dean",
    "vice_dean",
    "head_of_institute",
    "head_of_department",
    "deputy_head_of_department",
    "field_of_study_coordinator",
];

const FACTORS: &[&str] = &[
    "bachelor_thesis_supervision",
    "master_thesis_supervision",
    "thesis_review",
    "field_trip",
    "student_club_supervision",
    "internship_coordination",
];

fn load_config() -> PensumConfig {
    ConfigLoader::load("./config/pensum").unwrap().into_config()
}

fn create_pensum(
    basic_threshold: Decimal,
    reductions: Vec<Reduction>,
    threshold_factors: Vec<ThresholdFactor>,
) -> Pensum {
    Pensum {
        id: "p_001".to_string(),
        schedule_id: "2025/26".to_string(),
        employee: Employee {
            id: "emp_001".to_string(),
            group: EmployeeGroup::ResearchAndTeaching,
            position: "professor".to_string(),
            job_time: Decimal::ONE,
        },
        basic_threshold,
        reductions,
        threshold_factors,
        additional_hours_factors: vec![],
        exam_additional_hours: vec![],
    }
}

fn hundredths(max: i64) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(|n| Decimal::new(n, 2))
}

fn reductions() -> impl Strategy<Value = Vec<Reduction>> {
    prop::sample::subsequence(ROLES.to_vec(), 0..=3).prop_map(|roles| {
        roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| Reduction {
                id: format!("r_{}", i),
                role: role.to_string(),
            })
            .collect()
    })
}

fn threshold_factors() -> impl Strategy<Value = Vec<ThresholdFactor>> {
    prop::collection::vec((any::<bool>(), hundredths(20_000)), 0..4).prop_map(|factors| {
        factors
            .into_iter()
            .enumerate()
            .map(|(i, (additive, value))| ThresholdFactor {
                id: format!("tf_{}", i),
                kind: if additive {
                    FactorKind::Additive
                } else {
                    FactorKind::Multiplicative
                },
                value,
                description: None,
            })
            .collect()
    })
}

fn additional_hours_entry(id: &'static str) -> impl Strategy<Value = AdditionalHoursFactor> {
    (
        prop::sample::select(FACTORS.to_vec()),
        hundredths(2_000),
        hundredths(1_500),
    )
        .prop_map(move |(name, value_per_unit, amount)| AdditionalHoursFactor {
            id: id.to_string(),
            name: name.to_string(),
            value_per_unit,
            amount,
        })
}

/// Non-negative decimals from small hundredths up to `Decimal::MAX`.
fn extreme_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        hundredths(2_000),
        any::<u64>().prop_map(Decimal::from),
        (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale)),
        Just(Decimal::MAX),
    ]
}

fn extreme_threshold_factors() -> impl Strategy<Value = Vec<ThresholdFactor>> {
    prop::collection::vec((any::<bool>(), extreme_decimal()), 0..3).prop_map(|factors| {
        factors
            .into_iter()
            .enumerate()
            .map(|(i, (additive, value))| ThresholdFactor {
                id: format!("tf_{}", i),
                kind: if additive {
                    FactorKind::Additive
                } else {
                    FactorKind::Multiplicative
                },
                value,
                description: None,
            })
            .collect()
    })
}

fn extreme_entries() -> impl Strategy<Value = Vec<AdditionalHoursFactor>> {
    prop::collection::vec(
        (
            prop::sample::select(FACTORS.to_vec()),
            extreme_decimal(),
            extreme_decimal(),
        ),
        0..3,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, value_per_unit, amount))| AdditionalHoursFactor {
                id: format!("stored_{}", i),
                name: name.to_string(),
                value_per_unit,
                amount,
            })
            .collect()
    })
}

fn ok_or_calculation_error<T>(result: &EngineResult<T>) -> bool {
    matches!(result, Ok(_) | Err(EngineError::CalculationError { .. }))
}

proptest! {
    #[test]
    fn prop_threshold_is_never_negative(
        basic in 0u32..400,
        reductions in reductions(),
        factors in threshold_factors(),
    ) {
        let config = load_config();
        let pensum = create_pensum(Decimal::from(basic), reductions, factors);

        let result = calculate_threshold(&pensum, &config).unwrap();
        prop_assert!(result.calculated_threshold >= Decimal::ZERO);
        let ends_with_clamp = result
            .steps
            .last()
            .map(|step| step.rule_id == "threshold_clamp")
            .unwrap_or(false);
        prop_assert_eq!(ends_with_clamp, result.clamped);
    }

    #[test]
    fn prop_clamped_threshold_ignores_factors(
        reductions in reductions(),
        factors in threshold_factors(),
    ) {
        let config = load_config();
        let with_factors = create_pensum(Decimal::from(100), reductions.clone(), factors);
        let without_factors = create_pensum(Decimal::from(100), reductions, vec![]);

        let a = calculate_threshold(&with_factors, &config).unwrap();
        let b = calculate_threshold(&without_factors, &config).unwrap();
        if b.clamped {
            prop_assert!(a.clamped);
            prop_assert_eq!(a.calculated_threshold, Decimal::ZERO);
        }
    }

    #[test]
    fn prop_additive_and_multiplicative_factors_do_not_commute(
        basic in 1u32..400,
        add in 1u32..100,
        mul in 2u32..50,
    ) {
        let config = load_config();
        let additive = ThresholdFactor {
            id: "add".to_string(),
            kind: FactorKind::Additive,
            value: Decimal::from(add),
            description: None,
        };
        let multiplicative = ThresholdFactor {
            id: "mul".to_string(),
            kind: FactorKind::Multiplicative,
            value: Decimal::new(i64::from(mul), 1),
            description: None,
        };

        let add_first = create_pensum(
            Decimal::from(basic),
            vec![],
            vec![additive.clone(), multiplicative.clone()],
        );
        let mul_first = create_pensum(Decimal::from(basic), vec![], vec![multiplicative, additive]);

        // (b + a) × m − (b × m + a) = a × (m − 1), nonzero for m ≠ 1
        let a = calculate_threshold(&add_first, &config).unwrap().calculated_threshold;
        let b = calculate_threshold(&mul_first, &config).unwrap().calculated_threshold;
        prop_assert_eq!(a - b, Decimal::from(add) * (Decimal::new(i64::from(mul), 1) - Decimal::ONE));
    }

    #[test]
    fn prop_accepted_entry_stays_accepted_when_resubmitted(
        stored in additional_hours_entry("stored"),
        proposed in additional_hours_entry("proposed"),
    ) {
        let config = load_config();
        let mut pensum = create_pensum(Decimal::from(180), vec![], vec![]);
        pensum.additional_hours_factors.push(stored);

        let validation = validate_additional_hours(&pensum, &proposed, &config).unwrap();
        if validation.is_accepted() {
            pensum.additional_hours_factors.push(proposed.clone());
            let again = validate_additional_hours(&pensum, &proposed, &config).unwrap();
            prop_assert_eq!(again, validation);
        }
    }

    #[test]
    fn prop_reported_maximum_satisfies_its_rule(
        stored in additional_hours_entry("stored"),
        proposed in additional_hours_entry("proposed"),
    ) {
        let config = load_config();
        let mut pensum = create_pensum(Decimal::from(180), vec![], vec![]);
        pensum.additional_hours_factors.push(stored);

        if let Validation::Rejected(rejection) =
            validate_additional_hours(&pensum, &proposed, &config).unwrap()
        {
            for violation in &rejection.violations {
                let mut corrected = proposed.clone();
                match violation.field {
                    LimitedField::ValuePerUnit => corrected.value_per_unit = violation.maximum,
                    LimitedField::Amount => corrected.amount = violation.maximum,
                    LimitedField::Portion => unreachable!(),
                }

                let retried = validate_additional_hours(&pensum, &corrected, &config).unwrap();
                if let Validation::Rejected(again) = retried {
                    prop_assert!(again.violations.iter().all(|v| v.rule != violation.rule));
                }
            }
        }
    }

    #[test]
    fn prop_portion_within_headroom_passes_sum_rule(
        recorded in prop::collection::vec(hundredths(40), 0..3),
        portion in hundredths(100),
    ) {
        let config = load_config();
        let pensum = create_pensum(Decimal::from(180), vec![], vec![]);
        let staffing = ModuleExamStaffing {
            module_id: "mod_1".to_string(),
            portions: recorded
                .iter()
                .enumerate()
                .map(|(i, portion)| StaffPortion {
                    entry_id: format!("other_{}", i),
                    pensum_id: format!("p_{}", i),
                    portion: *portion,
                })
                .collect(),
        };
        // 10 students are not credited, so only the sum rule applies
        let entry = ExamAdditionalHours {
            id: "mine".to_string(),
            module_id: "mod_1".to_string(),
            students_number: 10,
            exam_type: ExamType::Written,
            portion,
        };

        let headroom = (Decimal::ONE - recorded.iter().copied().sum::<Decimal>()).max(Decimal::ZERO);
        let validation = validate_exam_hours(&pensum, &staffing, &entry, &config).unwrap();
        prop_assert_eq!(validation.is_accepted(), portion <= headroom);
    }

    #[test]
    fn prop_extreme_additional_hours_never_panic(
        basic in extreme_decimal(),
        factors in extreme_threshold_factors(),
        stored in extreme_entries(),
        name in prop::sample::select(FACTORS.to_vec()),
        value_per_unit in extreme_decimal(),
        amount in extreme_decimal(),
        planned in extreme_decimal(),
    ) {
        let config = load_config();
        let mut pensum = create_pensum(basic, vec![], factors);
        pensum.additional_hours_factors = stored;
        let proposed = AdditionalHoursFactor {
            id: "proposed".to_string(),
            name: name.to_string(),
            value_per_unit,
            amount,
        };

        let threshold = calculate_threshold(&pensum, &config);
        prop_assert!(ok_or_calculation_error(&threshold), "{:?}", threshold);
        let validation = validate_additional_hours(&pensum, &proposed, &config);
        prop_assert!(ok_or_calculation_error(&validation), "{:?}", validation);
        let summary = summarize_workload(&pensum, planned, &config);
        prop_assert!(ok_or_calculation_error(&summary), "{:?}", summary);
    }

    #[test]
    fn prop_extreme_exam_portions_never_panic(
        basic in extreme_decimal(),
        stored_portion in extreme_decimal(),
        recorded in prop::collection::vec(extreme_decimal(), 0..3),
        students_number in any::<u32>(),
        portion in hundredths(100),
    ) {
        let config = load_config();
        let mut pensum = create_pensum(basic, vec![], vec![]);
        pensum.exam_additional_hours.push(ExamAdditionalHours {
            id: "mine".to_string(),
            module_id: "mod_1".to_string(),
            students_number,
            exam_type: ExamType::Oral,
            portion: stored_portion,
        });
        let staffing = ModuleExamStaffing {
            module_id: "mod_1".to_string(),
            portions: recorded
                .iter()
                .enumerate()
                .map(|(i, portion)| StaffPortion {
                    entry_id: format!("other_{}", i),
                    pensum_id: format!("p_{}", i),
                    portion: *portion,
                })
                .collect(),
        };
        let entry = ExamAdditionalHours {
            portion,
            ..pensum.exam_additional_hours[0].clone()
        };

        let validation = validate_exam_hours(&pensum, &staffing, &entry, &config);
        prop_assert!(ok_or_calculation_error(&validation), "{:?}", validation);
    }
}
