//! Fuzzy inference primitives for the OpenRegen controllers.
//!
//! Both the braking controller and the suspension controller are zero-order
//! Sugeno fuzzy systems: crisp inputs are fuzzified through triangular or
//! trapezoidal membership functions, rule activations are combined by
//! product, and the crisp output is the activation-weighted average of the
//! rules' output singletons. This crate holds the two pieces they share:
//! [`MembershipFunction`] and [`SugenoBlender`].
//!
//! # RT Safety
//!
//! All evaluation is allocation-free with bounded execution time; only
//! construction validates and can fail.
//!
//! # Example
//!
//! ```
//! use openregen_fuzzy::{MembershipFunction, SugenoBlender};
//!
//! let light = MembershipFunction::trapezoidal(0.0, 0.0, 0.2, 0.4).expect("valid");
//! let heavy = MembershipFunction::trapezoidal(0.6, 0.8, 1.0, 1.0).expect("valid");
//!
//! let intensity = 0.3;
//! let mut blender = SugenoBlender::new();
//! blender.add(light.degree(intensity), 0.9); // light braking -> high regen
//! blender.add(heavy.degree(intensity), 0.3); // heavy braking -> low regen
//! let regen = blender.crisp(0.5);
//! assert!(regen > 0.5); // light dominates at 0.3
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod membership;
pub mod sugeno;

pub use membership::{FuzzyError, MembershipFunction};
pub use sugeno::SugenoBlender;
