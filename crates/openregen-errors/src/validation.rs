//! Input validation error types.
//!
//! Per-cycle input structs are validated field by field before any control
//! math runs. Every variant names the offending field so the host can log a
//! precise fault and hold the previous safe actuator command.

use core::fmt;

use crate::common::ErrorSeverity;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value out of range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: String,
        /// The invalid value
        value: String,
        /// Minimum allowed value
        min: String,
        /// Maximum allowed value
        max: String,
    },

    /// Value is not a finite number
    #[error("{field} value is not finite")]
    NotFinite {
        /// Field name
        field: String,
    },

    /// Value is required but missing
    #[error("Required field '{0}' is missing")]
    Required(String),

    /// Constraint violation spanning more than one field
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Custom validation error
    #[error("Validation error: {0}")]
    Custom(String),
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create an out of range error for a numeric value.
    pub fn out_of_range<T: fmt::Debug>(field: impl Into<String>, value: T, min: T, max: T) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            value: format!("{:?}", value),
            min: format!("{:?}", min),
            max: format!("{:?}", max),
        }
    }

    /// Create a non-finite value error.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite {
            field: field.into(),
        }
    }

    /// Create a required field error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required(field.into())
    }

    /// Create a constraint violation error.
    pub fn constraint(msg: impl Into<String>) -> Self {
        ValidationError::ConstraintViolation(msg.into())
    }

    /// Create a custom validation error.
    pub fn custom(msg: impl Into<String>) -> Self {
        ValidationError::Custom(msg.into())
    }
}

/// Check a numeric field against inclusive bounds.
///
/// Rejects non-finite values before the bound check so that NaN cannot slip
/// through an ordered comparison.
///
/// # Errors
///
/// Returns [`ValidationError::NotFinite`] or [`ValidationError::OutOfRange`].
pub fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> std::result::Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::not_finite(field));
    }
    if value < min || value > max {
        return Err(ValidationError::out_of_range(field, value, min, max));
    }
    Ok(value)
}
