//! Additional-hours entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pensum::new_entry_id;

/// An extra-duty entry credited as `value_per_unit × amount` hours.
///
/// The caps that apply to an entry are configured per `name`, see
/// [`crate::config::AdditionalHoursFactorRule`].
///
/// # Example
///
/// ```
/// use pensum_engine::models::AdditionalHoursFactor;
/// use rust_decimal::Decimal;
///
/// let entry = AdditionalHoursFactor {
///     id: "ah_1".to_string(),
///     name: "thesis_review".to_string(),
///     value_per_unit: Decimal::from(2),
///     amount: Decimal::from(3),
/// };
/// assert_eq!(entry.hours(), Some(Decimal::from(6)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalHoursFactor {
    /// Identifier of the entry.
    #[serde(default = "new_entry_id")]
    pub id: String,
    /// The factor name (key into the factor table).
    pub name: String,
    /// Hours credited per unit.
    pub value_per_unit: Decimal,
    /// Number of units.
    pub amount: Decimal,
}

impl AdditionalHoursFactor {
    /// Returns the hours credited by this entry.
    ///
    /// Returns `None` on decimal overflow.
    pub fn hours(&self) -> Option<Decimal> {
        self.value_per_unit.checked_mul(self.amount)
    }
}
