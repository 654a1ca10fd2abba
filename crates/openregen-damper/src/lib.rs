//! Hydraulic electromagnetic damper model for OpenRegen.
//!
//! A physical/empirical model of one suspension corner's regenerative
//! damper: suspension compression kinematics in, electrical power, damping
//! force, and thermal state out. The model is stateless per call apart from
//! cumulative diagnostics (total harvested energy, operation cycles).
//!
//! The damper harvests on both strokes — the electromagnetic circuit
//! rectifies compression and extension alike, so only the magnitude of the
//! compression velocity matters for generated power.
//!
//! ```
//! use openregen_damper::{DamperConfig, DamperInputs, HydraulicDamper};
//!
//! let mut damper = HydraulicDamper::new(DamperConfig::default());
//! let outputs = damper
//!     .calculate_damper_performance(&DamperInputs {
//!         compression_velocity_mps: 0.5,
//!         displacement_m: 0.05,
//!         vehicle_speed_kmh: 60.0,
//!         road_roughness: 0.2,
//!         damper_temperature_c: 20.0,
//!         battery_soc: 0.3,
//!         load_factor: 0.5,
//!     })
//!     .expect("inputs are in range");
//! assert!(outputs.generated_power_w > 0.0);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod model;
pub mod types;

pub use model::HydraulicDamper;
pub use types::{DamperConfig, DamperDiagnostics, DamperInputs, DamperOutputs};
