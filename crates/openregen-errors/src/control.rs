//! Controller and configuration error types.
//!
//! These cover faults that are not per-field input validation: unknown
//! identifiers handed to a mutation operation, and configurations that are
//! internally inconsistent (e.g. a curve with unordered breakpoints).

use crate::common::ErrorSeverity;

/// Controller and configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    /// An identifier passed to a mutation operation does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// What kind of thing was looked up ("motor", "corner", ...).
        kind: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },

    /// A configuration value set is internally inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ControlError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ControlError::NotFound { .. } => ErrorSeverity::Error,
            ControlError::InvalidConfiguration(_) => ErrorSeverity::Critical,
        }
    }

    /// Create a not-found error.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        ControlError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        ControlError::InvalidConfiguration(msg.into())
    }
}
