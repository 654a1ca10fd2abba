//! Regenerative braking control for OpenRegen.
//!
//! Two cooperating pieces, composed once per control cycle:
//!
//! - [`FuzzyBrakingController`]: maps driving state (speed, braking
//!   intensity, battery state of charge, motor temperature) to a
//!   regenerative-braking ratio through a zero-order Sugeno rule base.
//! - [`TorqueDistributionModel`]: turns the demanded braking force and that
//!   ratio into per-motor torque commands under torque, power, thermal, and
//!   charge-acceptance limits, topping up the remainder with mechanical
//!   brake force.
//!
//! The controller owns a distribution model so a host can drive the whole
//! braking chain through one call:
//!
//! ```
//! use openregen_braking::{BrakingInputs, FuzzyBrakingController, VehicleParameters};
//!
//! let mut controller = FuzzyBrakingController::new(VehicleParameters::default());
//! let outputs = controller
//!     .calculate_optimal_braking(&BrakingInputs {
//!         vehicle_speed_kmh: 80.0,
//!         braking_intensity: 0.3,
//!         battery_soc: 0.4,
//!         motor_temperature_c: 55.0,
//!     })
//!     .expect("inputs are in range");
//! assert!(outputs.regen_ratio > 0.0 && outputs.regen_ratio <= 1.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod controller;
pub mod distribution;
pub mod types;

pub use controller::FuzzyBrakingController;
pub use distribution::{TorqueDistribution, TorqueDistributionModel};
pub use types::{BrakingInputs, BrakingOutputs, MotorCount, MotorLocation, VehicleParameters};
