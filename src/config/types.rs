//! Configuration types for pensum rules.
//!
//! This module contains the strongly-typed rule tables that are deserialized
//! from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeGroup, ExamType};

/// One row of the nominal-threshold table.
#[derive(Debug, Clone, Deserialize)]
pub struct NominalThreshold {
    /// The staff group the row applies to.
    pub group: EmployeeGroup,
    /// The position key the row applies to.
    pub position: String,
    /// Required teaching hours per year for a full-time job.
    pub hours: Decimal,
}

/// Fraction of the calculated threshold an employee may work as overtime.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeRatios {
    /// Ratio for research-and-teaching staff.
    pub research_and_teaching: Decimal,
    /// Ratio for teaching-only staff.
    pub teaching_only: Decimal,
}

impl OvertimeRatios {
    /// Returns the ratio for a group.
    pub fn for_group(&self, group: EmployeeGroup) -> Decimal {
        match group {
            EmployeeGroup::ResearchAndTeaching => self.research_and_teaching,
            EmployeeGroup::TeachingOnly => self.teaching_only,
        }
    }
}

/// Threshold configuration file structure (`thresholds.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    /// Nominal thresholds by group and position.
    pub nominal_thresholds: Vec<NominalThreshold>,
    /// Overtime ratios by group.
    pub overtime: OvertimeRatios,
}

/// A staffing-reduction role.
#[derive(Debug, Clone, Deserialize)]
pub struct ReductionRole {
    /// Human-readable name of the role.
    pub description: String,
    /// Hours subtracted from the basic threshold.
    pub hours: Decimal,
}

/// Reductions configuration file structure (`reductions.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ReductionsConfig {
    /// Map of role key to role details.
    pub roles: HashMap<String, ReductionRole>,
}

/// The period a factor limit is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPeriod {
    /// The limit covers a whole year.
    Year,
    /// The limit covers one semester.
    Semester,
}

/// A cap on the summed hours of same-named entries.
#[derive(Debug, Clone, Deserialize)]
pub struct HoursLimit {
    /// Maximum hours per `period`.
    pub hours: Decimal,
    /// The period `hours` is denominated in.
    pub period: LimitPeriod,
}

impl HoursLimit {
    /// Returns the limit for a whole year.
    ///
    /// Semester limits are doubled since two semesters compose a year.
    // TODO: replace the doubling once schedules carry per-semester entries.
    pub fn yearly(&self) -> Decimal {
        match self.period {
            LimitPeriod::Year => self.hours,
            LimitPeriod::Semester => self.hours * Decimal::TWO,
        }
    }
}

/// Static rules of one additional-hours factor.
#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalHoursFactorRule {
    /// Human-readable name of the duty.
    pub description: String,
    /// Largest permitted `value_per_unit`.
    pub max_value_per_unit: Decimal,
    /// Cap on the hours of all same-named entries, for ungrouped factors.
    #[serde(default)]
    pub limit: Option<HoursLimit>,
    /// Group whose annual amount cap this factor shares.
    #[serde(default)]
    pub group: Option<String>,
    /// Whether credited hours consume the overtime allowance.
    #[serde(default = "counts_by_default")]
    pub counts_toward_overtime: bool,
}

fn counts_by_default() -> bool {
    true
}

/// A group of factors sharing one annual amount cap.
#[derive(Debug, Clone, Deserialize)]
pub struct FactorGroup {
    /// Human-readable name of the group.
    pub description: String,
    /// Largest summed `amount` of the group's entries per year.
    pub max_amount_per_year: Decimal,
}

/// Additional-hours configuration file structure (`additional_hours.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalHoursConfig {
    /// Map of group key to group details.
    #[serde(default)]
    pub groups: HashMap<String, FactorGroup>,
    /// Map of factor name to factor rules.
    pub factors: HashMap<String, AdditionalHoursFactorRule>,
}

/// Exam configuration file structure (`exams.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ExamConfig {
    /// Hours credited per student for a written exam.
    pub written_hours_per_student: Decimal,
    /// Hours credited per student for an oral exam.
    pub oral_hours_per_student: Decimal,
    /// Exams are credited only above this number of students.
    pub minimum_students: u32,
}

impl ExamConfig {
    /// Returns the per-student factor for an exam type.
    pub fn hours_per_student(&self, exam_type: ExamType) -> Decimal {
        match exam_type {
            ExamType::Written => self.written_hours_per_student,
            ExamType::Oral => self.oral_hours_per_student,
        }
    }
}

/// The complete rule tables loaded from YAML files.
///
/// Passed explicitly to every calculation; nothing reads it from global
/// state.
#[derive(Debug, Clone)]
pub struct PensumConfig {
    thresholds: ThresholdsConfig,
    reductions: ReductionsConfig,
    additional_hours: AdditionalHoursConfig,
    exams: ExamConfig,
}

impl PensumConfig {
    /// Creates a PensumConfig from its component parts.
    ///
    /// Fails if a factor references a group that is not configured.
    pub fn new(
        thresholds: ThresholdsConfig,
        reductions: ReductionsConfig,
        additional_hours: AdditionalHoursConfig,
        exams: ExamConfig,
    ) -> EngineResult<Self> {
        for rule in additional_hours.factors.values() {
            if let Some(group) = &rule.group {
                if !additional_hours.groups.contains_key(group) {
                    return Err(EngineError::FactorGroupNotFound {
                        group: group.clone(),
                    });
                }
            }
        }

        Ok(Self {
            thresholds,
            reductions,
            additional_hours,
            exams,
        })
    }

    /// Returns the threshold tables.
    pub fn thresholds(&self) -> &ThresholdsConfig {
        &self.thresholds
    }

    /// Returns the exam constants.
    pub fn exams(&self) -> &ExamConfig {
        &self.exams
    }

    /// Returns the additional-hours tables.
    pub fn additional_hours(&self) -> &AdditionalHoursConfig {
        &self.additional_hours
    }

    /// Looks up the nominal full-time hours for an employee.
    pub fn nominal_hours(&self, employee: &Employee) -> EngineResult<Decimal> {
        self.thresholds
            .nominal_thresholds
            .iter()
            .find(|row| row.group == employee.group && row.position == employee.position)
            .map(|row| row.hours)
            .ok_or_else(|| EngineError::NominalThresholdNotFound {
                group: employee.group.as_str().to_string(),
                position: employee.position.clone(),
            })
    }

    /// Returns the overtime ratio for a group.
    pub fn overtime_ratio(&self, group: EmployeeGroup) -> Decimal {
        self.thresholds.overtime.for_group(group)
    }

    /// Looks up a reduction role.
    pub fn reduction_role(&self, role: &str) -> EngineResult<&ReductionRole> {
        self.reductions
            .roles
            .get(role)
            .ok_or_else(|| EngineError::ReductionRoleNotFound {
                role: role.to_string(),
            })
    }

    /// Looks up the rules of an additional-hours factor.
    pub fn factor_rule(&self, name: &str) -> EngineResult<&AdditionalHoursFactorRule> {
        self.additional_hours
            .factors
            .get(name)
            .ok_or_else(|| EngineError::AdditionalHoursFactorNotFound {
                name: name.to_string(),
            })
    }

    /// Looks up a factor group.
    pub fn factor_group(&self, group: &str) -> EngineResult<&FactorGroup> {
        self.additional_hours
            .groups
            .get(group)
            .ok_or_else(|| EngineError::FactorGroupNotFound {
                group: group.to_string(),
            })
    }
}
