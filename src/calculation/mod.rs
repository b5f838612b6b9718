//! Pensum calculation and validation rules.
//!
//! This module contains the rule functions of the engine. Each one is a pure
//! function of a [`crate::models::Pensum`] snapshot, the proposed entry (if
//! any) and the [`crate::config::PensumConfig`] rule tables.

mod additional_hours_limit;
mod basic_threshold;
mod exam_hours;
mod integrity;
mod overtime;
mod threshold;
mod workload;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::AdditionalHoursFactor;

pub use additional_hours_limit::validate_additional_hours;
pub use basic_threshold::basic_threshold_for;
pub use exam_hours::{credited_exam_hours, exam_hours, validate_exam_hours};
pub use integrity::{
    ensure_unique_pensum, validate_additional_hours_entry, validate_employee, validate_exam_entry,
    validate_reduction, validate_threshold_factor,
};
pub use overtime::{Excluding, OvertimeBudget, overtime_budget};
pub use threshold::{ThresholdCalculation, calculate_threshold};
pub use workload::{WorkloadSummary, summarize_workload};

/// Decimal places of reported maximum permissible values.
pub const REPORTED_DECIMAL_PLACES: u32 = 2;

/// Rounds a non-negative permissible maximum down, so that reporting it
/// never invites a value that would breach the cap.
pub(crate) fn floor_maximum(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(REPORTED_DECIMAL_PLACES, RoundingStrategy::ToNegativeInfinity)
}

/// Returns the hours credited by an additional-hours entry.
pub(crate) fn entry_hours(entry: &AdditionalHoursFactor) -> EngineResult<Decimal> {
    entry
        .hours()
        .ok_or_else(|| EngineError::overflow(&format!("additional hours entry '{}'", entry.id)))
}

/// Sums the hours credited by `entries`.
pub(crate) fn total_hours<'a>(
    entries: impl IntoIterator<Item = &'a AdditionalHoursFactor>,
) -> EngineResult<Decimal> {
    entries.into_iter().try_fold(Decimal::ZERO, |total, entry| {
        total
            .checked_add(entry_hours(entry)?)
            .ok_or_else(|| EngineError::overflow("additional hours total"))
    })
}
