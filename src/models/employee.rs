//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeGroup enum that select
//! the nominal-threshold row and the overtime ratio for a pensum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The staff group an academic employee belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeGroup {
    /// Research-and-teaching staff.
    ResearchAndTeaching,
    /// Teaching-only staff.
    TeachingOnly,
}

impl EmployeeGroup {
    /// Returns the configuration key of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeGroup::ResearchAndTeaching => "research_and_teaching",
            EmployeeGroup::TeachingOnly => "teaching_only",
        }
    }
}

/// Represents an employee whose teaching load is planned.
///
/// # Example
///
/// ```
/// use pensum_engine::models::{Employee, EmployeeGroup};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     group: EmployeeGroup::TeachingOnly,
///     position: "lecturer".to_string(),
///     job_time: Decimal::ONE,
/// };
/// assert!(employee.is_full_time());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The staff group of the employee.
    pub group: EmployeeGroup,
    /// The position key (e.g., "assistant_professor").
    pub position: String,
    /// Fraction of a full-time job, between 0 and 1.
    #[serde(default = "full_job_time")]
    pub job_time: Decimal,
}

fn full_job_time() -> Decimal {
    Decimal::ONE
}

impl Employee {
    /// Returns true if the employee works a full-time job.
    pub fn is_full_time(&self) -> bool {
        self.job_time == Decimal::ONE
    }
}
