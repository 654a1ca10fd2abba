//! Input, output, parameter, and diagnostics types for the suspension
//! controller.

use serde::{Deserialize, Serialize};

use crate::rules::RuleId;

/// Road surface classification, as reported by the host's perception stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceType {
    #[default]
    Asphalt,
    Concrete,
    Gravel,
    Cobblestone,
    OffRoad,
}

impl SurfaceType {
    /// Baseline roughness contribution of the surface itself, `[0, 1]`.
    ///
    /// Added on top of the measured roughness signal so that a gravel road
    /// with a momentarily quiet accelerometer still firms up the damper.
    pub fn roughness_bias(self) -> f64 {
        match self {
            SurfaceType::Asphalt => 0.0,
            SurfaceType::Concrete => 0.02,
            SurfaceType::Gravel => 0.12,
            SurfaceType::Cobblestone => 0.2,
            SurfaceType::OffRoad => 0.3,
        }
    }
}

/// Driver-selected chassis mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingMode {
    Eco,
    #[default]
    Comfort,
    Sport,
}

/// Per-corner, per-cycle suspension controller inputs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspensionInputs {
    /// Vehicle speed, km/h, valid `[0, 300]`.
    pub vehicle_speed_kmh: f64,
    /// Sprung-mass vertical acceleration, m/s², valid `[-50, 50]`.
    pub vertical_acceleration_ms2: f64,
    /// Suspension compression velocity, m/s, valid `[-2, 2]`.
    pub suspension_velocity_ms: f64,
    /// Suspension displacement from ride height, m, valid `[-0.15, 0.15]`.
    pub suspension_displacement_m: f64,
    /// Road roughness index, `[0, 1]`.
    pub road_roughness: f64,
    /// Road gradient, valid `[-0.3, 0.3]` (rise over run).
    pub road_gradient: f64,
    /// Surface classification.
    pub surface_type: SurfaceType,
    /// Longitudinal-acceleration aggressiveness, `[0, 1]`.
    pub acceleration_pattern: f64,
    /// Braking aggressiveness, `[0, 1]`.
    pub braking_pattern: f64,
    /// Cornering aggressiveness, `[0, 1]`.
    pub cornering_pattern: f64,
    /// Driver-selected chassis mode.
    pub driving_mode: DrivingMode,
    /// Main hydraulic circuit pressure, bar, valid `[0, 350]`.
    pub hydraulic_pressure_bar: f64,
    /// Accumulator pressure, bar, valid `[0, 350]`.
    pub accumulator_pressure_bar: f64,
    /// Hydraulic fluid temperature, C, valid `[-40, 200]`.
    pub fluid_temperature_c: f64,
    /// Recovered-energy storage level, `[0, 1]`.
    pub energy_storage_level: f64,
    /// Ambient temperature, C, valid `[-40, 60]`.
    pub ambient_temperature_c: f64,
    /// Corner load factor, `[0, 1]` (0 = unladen, 1 = maximum load).
    pub vehicle_load_factor: f64,
}

impl Default for SuspensionInputs {
    fn default() -> Self {
        Self {
            vehicle_speed_kmh: 0.0,
            vertical_acceleration_ms2: 0.0,
            suspension_velocity_ms: 0.0,
            suspension_displacement_m: 0.0,
            road_roughness: 0.0,
            road_gradient: 0.0,
            surface_type: SurfaceType::Asphalt,
            acceleration_pattern: 0.0,
            braking_pattern: 0.0,
            cornering_pattern: 0.0,
            driving_mode: DrivingMode::Comfort,
            hydraulic_pressure_bar: 150.0,
            accumulator_pressure_bar: 180.0,
            fluid_temperature_c: 25.0,
            energy_storage_level: 0.5,
            ambient_temperature_c: 20.0,
            vehicle_load_factor: 0.5,
        }
    }
}

/// Result of one suspension control cycle. The all-zero default is the
/// "damper fully soft, no recovery" state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuspensionOutputs {
    /// Commanded damping coefficient, N·s/m, `[0, 5000]`.
    pub damping_coefficient: f64,
    /// Commanded energy-recovery rate, W, `[0, 1500]`.
    pub energy_recovery_w: f64,
    /// Predicted ride-comfort index, `[0, 1]` (1 is best).
    pub comfort_index: f64,
    /// Energy-conversion efficiency estimate, `[0, 1]`.
    pub energy_efficiency: f64,
    /// Overall system efficiency estimate, `[0, 1]`.
    pub system_efficiency: f64,
    /// Damper valve position command, `[0, 1]` (0 = open/soft, 1 = firm).
    pub valve_position: f64,
}

/// Optional forward road-condition data from map or camera preview.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadConditionData {
    /// Expected roughness over the prediction horizon, `[0, 1]`.
    pub upcoming_roughness: f64,
    /// Confidence in the preview, `[0, 1]`.
    pub confidence: f64,
}

/// Optional aggregated driving-pattern statistics from the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrivingPatternData {
    /// Rolling aggressiveness score, `[0, 1]`.
    pub aggressiveness: f64,
    /// Rolling smoothness score, `[0, 1]`.
    pub smoothness: f64,
}

/// Online-learning parameters and the learned per-rule weights.
///
/// The rule weights are the controller's only persistent learned state;
/// they are indexed by [`RuleId`] and clamped to `[0.1, 1.0]` after every
/// update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveParameters {
    /// Step size applied to the performance error signal.
    pub learning_rate: f64,
    /// Per-cycle decay pulling weights back toward neutral.
    pub forgetting_factor: f64,
    /// Minimum absolute error before a weight moves at all.
    pub adaptation_threshold: f64,
    /// Number of recent cycles considered for the performance signal.
    pub history_window: usize,
    /// Learned rule weights, indexed by [`RuleId::index`].
    pub rule_weights: [f64; RuleId::COUNT],
}

impl Default for AdaptiveParameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            forgetting_factor: 0.98,
            adaptation_threshold: 0.1,
            history_window: 50,
            rule_weights: [0.5; RuleId::COUNT],
        }
    }
}

impl AdaptiveParameters {
    /// Weight of one rule.
    pub fn weight(&self, rule: RuleId) -> f64 {
        self.rule_weights[rule.index()]
    }
}

/// Short-horizon prediction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictiveParameters {
    /// Look-ahead horizon, s.
    pub horizon_s: f64,
    /// Minimum trend confidence before anticipatory action is taken.
    pub confidence_threshold: f64,
    /// Period between trend re-estimations, s.
    pub update_period_s: f64,
}

impl Default for PredictiveParameters {
    fn default() -> Self {
        Self {
            horizon_s: 2.0,
            confidence_threshold: 0.6,
            update_period_s: 0.1,
        }
    }
}

/// Objective weights for the multi-objective output blend.
///
/// Always normalized so the four weights sum to 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationObjectives {
    pub comfort: f64,
    pub energy: f64,
    pub stability: f64,
    pub efficiency: f64,
}

impl Default for OptimizationObjectives {
    fn default() -> Self {
        Self {
            comfort: 0.35,
            energy: 0.3,
            stability: 0.2,
            efficiency: 0.15,
        }
    }
}

impl OptimizationObjectives {
    /// Sum of the four weights.
    pub fn total(&self) -> f64 {
        self.comfort + self.energy + self.stability + self.efficiency
    }

    /// Rescale the weights in place so they sum to 1.0.
    ///
    /// A degenerate all-zero vector falls back to the default split rather
    /// than dividing by zero.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total <= f64::EPSILON {
            *self = Self::default();
            return;
        }
        self.comfort /= total;
        self.energy /= total;
        self.stability /= total;
        self.efficiency /= total;
    }
}

/// Partial update for [`OptimizationObjectives`].
///
/// `None` fields retain their previous values; the merged result is
/// renormalized to sum 1.0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectivesUpdate {
    pub comfort: Option<f64>,
    pub energy: Option<f64>,
    pub stability: Option<f64>,
    pub efficiency: Option<f64>,
}

impl ObjectivesUpdate {
    /// Merge onto `current`, then renormalize.
    pub fn apply(&self, current: &mut OptimizationObjectives) {
        if let Some(v) = self.comfort {
            current.comfort = v.max(0.0);
        }
        if let Some(v) = self.energy {
            current.energy = v.max(0.0);
        }
        if let Some(v) = self.stability {
            current.stability = v.max(0.0);
        }
        if let Some(v) = self.efficiency {
            current.efficiency = v.max(0.0);
        }
        current.normalize();
    }
}

/// Qualitative direction of recent controller performance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    Improving,
    #[default]
    Stable,
    Declining,
}

/// Rolling controller diagnostics snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuspensionDiagnostics {
    /// Rolling mean of the comfort index.
    pub average_comfort_index: f64,
    /// Rolling mean of the system efficiency.
    pub average_system_efficiency: f64,
    /// Qualitative trend of the composite performance score.
    pub performance_trend: PerformanceTrend,
    /// Fraction of recent cycles in which each rule fired above threshold.
    pub rule_utilization: [f64; RuleId::COUNT],
    /// Control cycles executed since construction.
    pub cycles: u64,
}
