//! Integration and power arbitration layer for OpenRegen.
//!
//! [`IntegratedRegenSystem`] composes the whole energy-recovery core: one
//! fuzzy braking controller plus torque distribution, and a suspension
//! controller + hydraulic electromagnetic damper pair for each of the four
//! corners. Per cycle it runs every component once, then arbitrates:
//!
//! - thermal management derates each source by its component temperature,
//! - battery back-off ramps recovery to zero near the charging threshold,
//! - the combined generated power is capped at `max_combined_power_w`,
//!   preserving the prioritized source and scaling the other into the
//!   remainder.
//!
//! The reported [`EnergyBalance`] always satisfies
//! `total_generated_power_w == regenerative_braking_power_w +
//! damper_power_w` exactly, because it is computed as that sum.
//!
//! ```
//! use openregen_braking::VehicleParameters;
//! use openregen_system::{IntegratedInputs, IntegratedRegenSystem};
//!
//! let mut system = IntegratedRegenSystem::new(VehicleParameters::default());
//! let inputs = IntegratedInputs::default();
//! let outputs = system
//!     .calculate_integrated_performance(&inputs)
//!     .expect("default inputs are in range");
//! assert_eq!(
//!     outputs.energy_balance.total_generated_power_w,
//!     outputs.energy_balance.regenerative_braking_power_w
//!         + outputs.energy_balance.damper_power_w
//! );
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod system;
pub mod types;

pub use system::IntegratedRegenSystem;
pub use types::{
    CornerInputs, CornerOutputs, EnergyBalance, IntegratedInputs, IntegratedOutputs,
    SystemConfiguration, SystemConfigurationUpdate, SystemDiagnostics, SystemHealth,
    CORNER_COUNT,
};
