//! Adaptive/predictive suspension control for OpenRegen.
//!
//! [`AdvancedSuspensionController`] runs one damper corner. Per control
//! cycle it combines four mechanisms:
//!
//! 1. **Base fuzzy control** — suspension velocity, road roughness, driving
//!    mode, and thermal/energy state map to a damping level and valve
//!    position through a weighted Sugeno rule base.
//! 2. **Adaptive learning** — every rule carries a weight in `[0.1, 1.0]`
//!    that is nudged after each cycle from the observed performance score.
//! 3. **Predictive control** — a fixed-capacity ring buffer of recent road
//!    samples yields a roughness trend; rising roughness stiffens the
//!    damping before the bumps arrive.
//! 4. **Multi-objective blending** — comfort/energy/stability/efficiency
//!    weights (always normalized to sum 1) blend per-objective candidate
//!    outputs into the final command.
//!
//! Safety clamps are applied last: damping ≤ 5000 N·s/m, energy recovery
//! ≤ 1500 W, valve position in `[0, 1]`.

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod controller;
pub mod history;
pub mod rules;
pub mod types;

pub use controller::AdvancedSuspensionController;
pub use history::RingBuffer;
pub use rules::RuleId;
pub use types::{
    AdaptiveParameters, DrivingMode, DrivingPatternData, ObjectivesUpdate,
    OptimizationObjectives, PerformanceTrend, PredictiveParameters, RoadConditionData,
    SurfaceType, SuspensionDiagnostics, SuspensionInputs, SuspensionOutputs,
};
