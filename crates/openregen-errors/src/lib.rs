//! Centralized error types for OpenRegen
//!
//! This crate provides the unified error handling system for the OpenRegen
//! energy-recovery control core. There are exactly two failure classes in the
//! core (see the arbitration layer's documentation):
//!
//! - **Invalid input**: an out-of-range field in a per-cycle input struct.
//!   This is fatal for the cycle — the operation returns an error naming the
//!   offending field and its valid bounds, and produces no partial output.
//! - **Constraint saturation** (torque/power/temperature limits) is *not* an
//!   error and never appears here; it is clamped silently and surfaced
//!   through diagnostics.
//!
//! # Example
//!
//! ```
//! use openregen_errors::prelude::*;
//!
//! fn check_soc(soc: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&soc) {
//!         return Err(ValidationError::out_of_range("battery_soc", soc, 0.0, 1.0).into());
//!     }
//!     Ok(soc)
//! }
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod control;
pub mod prelude;
pub mod validation;

pub use common::{ErrorCategory, ErrorSeverity, RegenError};
pub use control::ControlError;
pub use validation::ValidationError;

/// A specialized `Result` type for OpenRegen operations.
pub type Result<T> = std::result::Result<T, RegenError>;
