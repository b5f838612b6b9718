//! Error types for the Pensum Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Limit violations are deliberately absent: a breached cap is a normal
//! validation outcome (see [`crate::models::Validation`]), not an error.

use thiserror::Error;

/// The main error type for the Pensum Engine.
///
/// # Example
///
/// ```
/// use pensum_engine::error::EngineError;
///
/// let error = EngineError::ReductionRoleNotFound {
///     role: "chancellor".to_string(),
/// };
/// assert_eq!(error.to_string(), "Reduction role not configured: chancellor");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A reduction references a role missing from the role table.
    #[error("Reduction role not configured: {role}")]
    ReductionRoleNotFound {
        /// The role name that was not found.
        role: String,
    },

    /// An additional-hours entry references an unknown factor name.
    #[error("Additional hours factor not configured: {name}")]
    AdditionalHoursFactorNotFound {
        /// The factor name that was not found.
        name: String,
    },

    /// A factor references a group missing from the group table.
    #[error("Additional hours group not configured: {group}")]
    FactorGroupNotFound {
        /// The group name that was not found.
        group: String,
    },

    /// No nominal threshold row exists for the employee's group and position.
    #[error("Nominal threshold not configured for group '{group}' and position '{position}'")]
    NominalThresholdNotFound {
        /// The employee group.
        group: String,
        /// The employee position.
        position: String,
    },

    /// An entry carried a value outside its permitted domain.
    #[error("Invalid entry field '{field}': {message}")]
    InvalidEntry {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An entry would break a uniqueness invariant.
    #[error("Duplicate {entity}: {key}")]
    DuplicateEntry {
        /// The kind of entity (e.g. "reduction").
        entity: String,
        /// The key that is already taken.
        key: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns true when the error reveals inconsistent static configuration
    /// rather than bad caller input.
    pub fn is_configuration_inconsistency(&self) -> bool {
        matches!(
            self,
            EngineError::ReductionRoleNotFound { .. }
                | EngineError::AdditionalHoursFactorNotFound { .. }
                | EngineError::FactorGroupNotFound { .. }
                | EngineError::NominalThresholdNotFound { .. }
        )
    }

    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidEntry {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn overflow(quantity: &str) -> Self {
        EngineError::CalculationError {
            message: format!("{} overflows", quantity),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
