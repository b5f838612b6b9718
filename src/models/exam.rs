//! Exam staffing entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pensum::new_entry_id;

/// The form of a module's exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    /// Written exam.
    Written,
    /// Oral exam.
    Oral,
}

/// An employee's share in administering one module's exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamAdditionalHours {
    /// Identifier of the entry.
    #[serde(default = "new_entry_id")]
    pub id: String,
    /// The examined module.
    pub module_id: String,
    /// Students of the module's main order, as fetched with the aggregate.
    pub students_number: u32,
    /// The form of the exam.
    pub exam_type: ExamType,
    /// The employee's fraction of the exam staffing, between 0 and 1.
    pub portion: Decimal,
}

/// One staffer's recorded portion of a module's exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffPortion {
    /// Identifier of the exam-hours entry.
    pub entry_id: String,
    /// The pensum holding the entry.
    pub pensum_id: String,
    /// The recorded portion.
    pub portion: Decimal,
}

/// Every portion currently recorded for one module's exam, across all
/// employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleExamStaffing {
    /// The examined module.
    pub module_id: String,
    /// Recorded portions.
    #[serde(default)]
    pub portions: Vec<StaffPortion>,
}

impl ModuleExamStaffing {
    /// Sums the recorded portions, skipping the entry with `excluded_id`.
    ///
    /// Returns `None` on decimal overflow.
    pub fn portions_total_excluding(&self, excluded_id: &str) -> Option<Decimal> {
        self.portions
            .iter()
            .filter(|p| p.entry_id != excluded_id)
            .try_fold(Decimal::ZERO, |total, p| total.checked_add(p.portion))
    }
}
