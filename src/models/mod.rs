//! Core data models for the Pensum Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod additional_hours;
mod audit;
mod employee;
mod exam;
mod pensum;
mod validation;

pub use additional_hours::AdditionalHoursFactor;
pub use audit::AuditStep;
pub use employee::{Employee, EmployeeGroup};
pub use exam::{ExamAdditionalHours, ExamType, ModuleExamStaffing, StaffPortion};
pub use pensum::{FactorKind, Pensum, Reduction, ThresholdFactor};
pub use validation::{LimitRule, LimitViolation, LimitedField, Rejection, Validation};
