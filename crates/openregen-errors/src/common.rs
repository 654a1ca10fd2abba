//! Common error types and utilities used across all OpenRegen crates.
//!
//! This module provides the top-level error enum that wraps all sub-errors,
//! along with error classification and severity levels.

use core::fmt;

use crate::{ControlError, ValidationError};

/// Top-level error type that can wrap all OpenRegen sub-errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegenError {
    /// Input validation errors (fatal for the cycle)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Controller and configuration errors
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl RegenError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegenError::Validation(_) => ErrorCategory::Validation,
            RegenError::Control(_) => ErrorCategory::Control,
            RegenError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegenError::Validation(e) => e.severity(),
            RegenError::Control(e) => e.severity(),
            RegenError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable by retrying a later cycle.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        RegenError::Other(msg.into())
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Input validation errors
    Validation = 0,
    /// Controller and configuration errors
    Control = 1,
    /// Other errors
    Other = 255,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "Validation"),
            ErrorCategory::Control => write!(f, "Control"),
            ErrorCategory::Other => write!(f, "Other"),
        }
    }
}

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, degraded operation possible
    Warning = 1,
    /// Error, the current cycle must be discarded
    Error = 2,
    /// Critical, the controller instance is unusable
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "Info"),
            ErrorSeverity::Warning => write!(f, "Warning"),
            ErrorSeverity::Error => write!(f, "Error"),
            ErrorSeverity::Critical => write!(f, "Critical"),
        }
    }
}
