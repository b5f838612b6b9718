//! Configuration loading and management for the Pensum Engine.
//!
//! This module provides functionality to load the static rule tables from
//! YAML files: nominal thresholds, overtime ratios, reduction roles,
//! additional-hours factors and groups, and exam constants.
//!
//! # Example
//!
//! ```no_run
//! use pensum_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/pensum").unwrap();
//! println!("Minimum exam students: {}", loader.config().exams().minimum_students);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AdditionalHoursConfig, AdditionalHoursFactorRule, ExamConfig, FactorGroup, HoursLimit,
    LimitPeriod, NominalThreshold, OvertimeRatios, PensumConfig, ReductionRole, ReductionsConfig,
    ThresholdsConfig,
};
