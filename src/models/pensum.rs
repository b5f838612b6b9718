//! Pensum aggregate and its threshold-shaping entries.
//!
//! A [`Pensum`] is the snapshot of one employee's teaching-load record for
//! one scheduling period, fetched in a single read by the calling layer.
//! Every rule in [`crate::calculation`] is a pure function of this snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AdditionalHoursFactor, Employee, ExamAdditionalHours};

/// Generates an identifier for an entry submitted without one.
pub(crate) fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// A staffing reduction granted for an administrative role.
///
/// The hour value is not stored on the entry; it is looked up by `role`
/// in the reduction table of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reduction {
    /// Identifier of the entry.
    #[serde(default = "new_entry_id")]
    pub id: String,
    /// The role key (e.g., "dean").
    pub role: String,
}

/// How a threshold factor combines with the running threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Adds the value to the running threshold.
    Additive,
    /// Multiplies the running threshold by the value.
    Multiplicative,
}

/// An ordered arithmetic adjustment applied after reductions.
///
/// # Example
///
/// ```
/// use pensum_engine::models::{FactorKind, ThresholdFactor};
/// use rust_decimal::Decimal;
///
/// let factor = ThresholdFactor {
///     id: "tf_1".to_string(),
///     kind: FactorKind::Multiplicative,
///     value: Decimal::new(5, 1),
///     description: None,
/// };
/// assert_eq!(factor.apply(Decimal::from(180)), Some(Decimal::from(90)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdFactor {
    /// Identifier of the entry.
    #[serde(default = "new_entry_id")]
    pub id: String,
    /// Whether the factor adds or multiplies.
    pub kind: FactorKind,
    /// The operand.
    pub value: Decimal,
    /// Optional note explaining the adjustment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ThresholdFactor {
    /// Applies this factor to a running threshold.
    ///
    /// Returns `None` on decimal overflow.
    pub fn apply(&self, threshold: Decimal) -> Option<Decimal> {
        match self.kind {
            FactorKind::Additive => threshold.checked_add(self.value),
            FactorKind::Multiplicative => threshold.checked_mul(self.value),
        }
    }
}

/// One employee's teaching-load record for one scheduling period.
///
/// Collections keep their stored order; threshold factors in particular are
/// order-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pensum {
    /// Identifier of the pensum.
    pub id: String,
    /// The scheduling period (schedule) the pensum belongs to.
    pub schedule_id: String,
    /// The employee the pensum belongs to.
    pub employee: Employee,
    /// Nominal required hours before reductions and factors.
    pub basic_threshold: Decimal,
    /// Role reductions, in stored order.
    #[serde(default)]
    pub reductions: Vec<Reduction>,
    /// Threshold factors, in stored order.
    #[serde(default)]
    pub threshold_factors: Vec<ThresholdFactor>,
    /// Additional-hours entries.
    #[serde(default)]
    pub additional_hours_factors: Vec<AdditionalHoursFactor>,
    /// Exam-hours entries.
    #[serde(default)]
    pub exam_additional_hours: Vec<ExamAdditionalHours>,
}

impl Pensum {
    /// Returns the stored additional-hours entry with the given id.
    pub fn additional_hours_entry(&self, id: &str) -> Option<&AdditionalHoursFactor> {
        self.additional_hours_factors.iter().find(|f| f.id == id)
    }

    /// Returns the stored exam-hours entry with the given id.
    pub fn exam_entry(&self, id: &str) -> Option<&ExamAdditionalHours> {
        self.exam_additional_hours.iter().find(|e| e.id == id)
    }

    /// Returns true if this pensum and `other` cover the same employee in
    /// the same schedule.
    pub fn same_slot(&self, other: &Pensum) -> bool {
        self.schedule_id == other.schedule_id && self.employee.id == other.employee.id
    }
}
