//! Basic threshold derivation.
//!
//! The basic threshold of a pensum is the nominal yearly teaching load of the
//! employee's group and position, scaled by the employee's job time.

use rust_decimal::Decimal;

use crate::config::PensumConfig;
use crate::error::EngineResult;
use crate::models::Employee;

use super::integrity::validate_employee;

/// Derives the basic threshold for an employee.
///
/// # Errors
///
/// - `InvalidEntry` if the job time lies outside [0, 1]
/// - `NominalThresholdNotFound` if no table row matches the employee's
///   group and position
///
/// # Examples
///
/// ```no_run
/// use pensum_engine::calculation::basic_threshold_for;
/// use pensum_engine::config::ConfigLoader;
/// use pensum_engine::models::{Employee, EmployeeGroup};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/pensum")?;
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     group: EmployeeGroup::TeachingOnly,
///     position: "lecturer".to_string(),
///     job_time: Decimal::new(5, 1),
/// };
/// let threshold = basic_threshold_for(&employee, loader.config())?;
/// assert_eq!(threshold, Decimal::from(180));
/// # Ok::<(), pensum_engine::error::EngineError>(())
/// ```
pub fn basic_threshold_for(employee: &Employee, config: &PensumConfig) -> EngineResult<Decimal> {
    validate_employee(employee)?;
    let nominal = config.nominal_hours(employee)?;
    Ok(nominal * employee.job_time)
}
