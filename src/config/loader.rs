//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pensum rule
//! tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    AdditionalHoursConfig, ExamConfig, PensumConfig, ReductionsConfig, ThresholdsConfig,
};

/// Loads and provides access to the pensum rule tables.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/pensum/
/// ├── thresholds.yaml        # Nominal thresholds and overtime ratios
/// ├── reductions.yaml        # Role reductions
/// ├── additional_hours.yaml  # Additional-hours factors and groups
/// └── exams.yaml             # Exam-hours constants
/// ```
///
/// # Example
///
/// ```no_run
/// use pensum_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pensum").unwrap();
/// let dean = loader.config().reduction_role("dean").unwrap();
/// println!("Dean reduction: {} hours", dean.hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PensumConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing, contains invalid
    /// YAML, or references a factor group that is not configured.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let thresholds = Self::load_yaml::<ThresholdsConfig>(&path.join("thresholds.yaml"))?;
        let reductions = Self::load_yaml::<ReductionsConfig>(&path.join("reductions.yaml"))?;
        let additional_hours =
            Self::load_yaml::<AdditionalHoursConfig>(&path.join("additional_hours.yaml"))?;
        let exams = Self::load_yaml::<ExamConfig>(&path.join("exams.yaml"))?;

        debug!(
            path = %path.display(),
            nominal_thresholds = thresholds.nominal_thresholds.len(),
            reduction_roles = reductions.roles.len(),
            factors = additional_hours.factors.len(),
            "Loaded pensum rule tables"
        );

        let config = PensumConfig::new(thresholds, reductions, additional_hours, exams)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rule tables.
    pub fn config(&self) -> &PensumConfig {
        &self.config
    }

    /// Consumes the loader, returning the rule tables.
    pub fn into_config(self) -> PensumConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmployeeGroup, ExamType};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/pensum"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(group: EmployeeGroup, position: &str) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            group,
            position: position.to_string(),
            job_time: Decimal::ONE,
        }
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_nominal_hours_lookup() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config();

        let professor = employee(EmployeeGroup::ResearchAndTeaching, "professor");
        assert_eq!(config.nominal_hours(&professor).unwrap(), dec("180"));

        let lecturer = employee(EmployeeGroup::TeachingOnly, "lecturer");
        assert_eq!(config.nominal_hours(&lecturer).unwrap(), dec("360"));
    }

    #[test]
    fn test_nominal_hours_unknown_position_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let unknown = employee(EmployeeGroup::TeachingOnly, "astronaut");

        match loader.config().nominal_hours(&unknown) {
            Err(EngineError::NominalThresholdNotFound { group, position }) => {
                assert_eq!(group, "teaching_only");
                assert_eq!(position, "astronaut");
            }
            other => panic!("Expected NominalThresholdNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_reduction_role_lookup() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let role = loader.config().reduction_role("deputy_head_of_department").unwrap();
        assert_eq!(role.hours, dec("30"));

        match loader.config().reduction_role("chancellor") {
            Err(EngineError::ReductionRoleNotFound { role }) => assert_eq!(role, "chancellor"),
            other => panic!("Expected ReductionRoleNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_factor_rules_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config();

        let club = config.factor_rule("student_club_supervision").unwrap();
        assert_eq!(club.max_value_per_unit, dec("5"));
        assert_eq!(club.limit.as_ref().unwrap().yearly(), dec("8"));
        assert!(club.group.is_none());
        assert!(!club.counts_toward_overtime);

        let review = config.factor_rule("thesis_review").unwrap();
        assert_eq!(review.limit.as_ref().unwrap().yearly(), dec("40"));

        let master = config.factor_rule("master_thesis_supervision").unwrap();
        assert_eq!(master.group.as_deref(), Some("thesis_supervision"));
        let group = config.factor_group("thesis_supervision").unwrap();
        assert_eq!(group.max_amount_per_year, dec("12"));
    }

    #[test]
    fn test_exam_and_overtime_constants_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config();

        assert_eq!(config.exams().hours_per_student(ExamType::Written), dec("0.2"));
        assert_eq!(config.exams().hours_per_student(ExamType::Oral), dec("0.3"));
        assert_eq!(config.exams().minimum_students, 10);
        assert_eq!(
            config.overtime_ratio(EmployeeGroup::ResearchAndTeaching),
            dec("0.25")
        );
        assert_eq!(config.overtime_ratio(EmployeeGroup::TeachingOnly), dec("0.5"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("thresholds.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}
