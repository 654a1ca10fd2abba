//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use openregen_errors::prelude::*;
//!
//! fn validate_intensity(value: f64) -> Result<f64> {
//!     validate_range!("braking_intensity", value, 0.0, 1.0);
//!     Ok(value)
//! }
//! ```

pub use crate::{
    Result,
    common::{ErrorCategory, ErrorSeverity, RegenError},
    control::ControlError,
    validation::{ValidationError, check_range},
};

/// Macro for an inline range check that returns early on violation.
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if !$value.is_finite() {
            return Err($crate::ValidationError::not_finite($field).into());
        }
        if $value < $min || $value > $max {
            return Err($crate::ValidationError::out_of_range($field, $value, $min, $max).into());
        }
    };
}
