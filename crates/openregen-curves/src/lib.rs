//! Derating curves for the OpenRegen control core.
//!
//! Every subsystem in the core scales an output as a protected quantity
//! drifts away from its comfort zone: motor torque collapses with winding
//! temperature, damper power with coil temperature, both with battery state
//! of charge, and recuperation efficiency with vehicle speed. Instead of
//! per-subsystem ad hoc formulas, each of these is a [`DeratingCurve`]: a
//! validated list of breakpoints with linear interpolation between them and
//! clamped extrapolation beyond the ends.
//!
//! # RT Safety
//!
//! `DeratingCurve::evaluate()` is RT-safe:
//! - No heap allocations
//! - Bounded execution time (breakpoint count is fixed at construction)
//! - No syscalls or I/O
//!
//! # Example
//!
//! ```
//! use openregen_curves::DeratingCurve;
//!
//! // A thermal curve: full output to 80 C, collapsing beyond.
//! let curve = DeratingCurve::new(vec![(-40.0, 1.0), (80.0, 1.0), (140.0, 0.1)])
//!     .expect("valid breakpoints");
//!
//! assert_eq!(curve.evaluate(20.0), 1.0);
//! assert!(curve.evaluate(120.0) < 0.5);
//! // Clamped beyond the last breakpoint
//! assert_eq!(curve.evaluate(500.0), curve.evaluate(140.0));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod derating;
pub mod error;
pub mod presets;

pub use derating::DeratingCurve;
pub use error::CurveError;
