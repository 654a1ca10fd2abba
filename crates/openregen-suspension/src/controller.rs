//! Adaptive/predictive suspension controller.
//!
//! One controller instance runs one damper corner. Each cycle: validate the
//! snapshot, fire the weighted fuzzy rule base, apply the predictive
//! roughness-trend stiffening, blend per-objective candidates, clamp to the
//! actuator limits, then feed the observed performance back into the rule
//! weights.

use openregen_curves::{presets, DeratingCurve};
use openregen_errors::prelude::*;
use openregen_errors::validate_range;
use openregen_fuzzy::{MembershipFunction, SugenoBlender};

use crate::history::RingBuffer;
use crate::rules::RuleId;
use crate::types::{
    AdaptiveParameters, DrivingMode, DrivingPatternData, ObjectivesUpdate,
    OptimizationObjectives, PerformanceTrend, PredictiveParameters, RoadConditionData,
    SuspensionDiagnostics, SuspensionInputs, SuspensionOutputs,
};

/// Damping coefficient actuator limit, N·s/m.
pub const MAX_DAMPING_COEFFICIENT: f64 = 5000.0;
/// Energy-recovery actuator limit, W.
pub const MAX_ENERGY_RECOVERY_W: f64 = 1500.0;

/// Rule weight bounds after every learning step.
const RULE_WEIGHT_MIN: f64 = 0.1;
const RULE_WEIGHT_MAX: f64 = 1.0;

/// Neutral damping level used when no rule fires at all.
const NEUTRAL_DAMPING_LEVEL: f64 = 0.3;

/// Anticipatory stiffening ceiling (fractional damping increase).
const MAX_ANTICIPATION: f64 = 0.35;

/// Minimum road samples before a trend is extrapolated.
const MIN_TREND_SAMPLES: usize = 8;

/// Minimum score samples before the performance trend leaves `Stable`.
const MIN_TREND_SCORES: usize = 20;
const TREND_DEADBAND: f64 = 0.02;

/// One remembered road observation.
#[derive(Clone, Copy, Debug, Default)]
struct RoadSample {
    roughness: f64,
    velocity: f64,
}

/// Per-rule crisp damping level, indexed by [`RuleId::index`].
const RULE_DAMPING_LEVELS: [f64; RuleId::COUNT] = [
    0.25, // low velocity, smooth road
    0.5,  // low velocity, rough road
    0.55, // high velocity, smooth road
    0.85, // high velocity, rough road
    0.6,  // energy storage low
    0.35, // thermal hot
    0.8,  // sport mode
    0.3,  // comfort mode
];

fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> MembershipFunction {
    MembershipFunction::trapezoidal(a, b, c, d)
        .unwrap_or(MembershipFunction::Trapezoidal { a, b, c, d })
}

/// Adaptive, predictive, multi-objective suspension controller for one
/// damper corner.
#[derive(Clone, Debug)]
pub struct AdvancedSuspensionController {
    adaptive: AdaptiveParameters,
    predictive: PredictiveParameters,
    objectives: OptimizationObjectives,
    velocity_low: MembershipFunction,
    velocity_high: MembershipFunction,
    roughness_smooth: MembershipFunction,
    roughness_rough: MembershipFunction,
    thermal_hot: MembershipFunction,
    thermal_curve: DeratingCurve,
    cold_curve: DeratingCurve,
    road_samples: RingBuffer<RoadSample, 64>,
    comfort_history: RingBuffer<f64, 1000>,
    efficiency_history: RingBuffer<f64, 1000>,
    score_history: RingBuffer<f64, 1000>,
    rule_fire_counts: [u64; RuleId::COUNT],
    cycles: u64,
}

impl Default for AdvancedSuspensionController {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvancedSuspensionController {
    /// Create a controller with default learning, prediction, and objective
    /// parameters.
    pub fn new() -> Self {
        Self::with_parameters(None, None, None)
    }

    /// Create a controller with partial parameter overrides; `None` fields
    /// take the documented defaults. Incoming rule weights are clamped to
    /// their bound and objective weights are renormalized.
    pub fn with_parameters(
        adaptive: Option<AdaptiveParameters>,
        predictive: Option<PredictiveParameters>,
        objectives: Option<OptimizationObjectives>,
    ) -> Self {
        let mut adaptive = adaptive.unwrap_or_default();
        for weight in &mut adaptive.rule_weights {
            *weight = weight.clamp(RULE_WEIGHT_MIN, RULE_WEIGHT_MAX);
        }
        let mut objectives = objectives.unwrap_or_default();
        objectives.normalize();

        Self {
            adaptive,
            predictive: predictive.unwrap_or_default(),
            objectives,
            // |suspension velocity|, m/s.
            velocity_low: trapezoid(0.0, 0.0, 0.2, 0.5),
            velocity_high: trapezoid(0.3, 0.7, 2.0, 2.0),
            // effective roughness index.
            roughness_smooth: trapezoid(0.0, 0.0, 0.2, 0.5),
            roughness_rough: trapezoid(0.3, 0.6, 1.0, 1.0),
            // fluid temperature, C.
            thermal_hot: trapezoid(90.0, 110.0, 200.0, 200.0),
            thermal_curve: presets::damper_thermal_protection(),
            cold_curve: presets::cold_efficiency(),
            road_samples: RingBuffer::new(),
            comfort_history: RingBuffer::new(),
            efficiency_history: RingBuffer::new(),
            score_history: RingBuffer::new(),
            rule_fire_counts: [0; RuleId::COUNT],
            cycles: 0,
        }
    }

    /// Snapshot of the learning parameters, including current rule weights.
    pub fn get_adaptive_parameters(&self) -> AdaptiveParameters {
        self.adaptive
    }

    /// Snapshot of the current (normalized) objective weights.
    pub fn get_objectives(&self) -> OptimizationObjectives {
        self.objectives
    }

    /// Merge a partial objective update and renormalize to sum 1.0.
    pub fn update_optimization_objectives(&mut self, update: &ObjectivesUpdate) {
        update.apply(&mut self.objectives);
        tracing::debug!(
            comfort = self.objectives.comfort,
            energy = self.objectives.energy,
            stability = self.objectives.stability,
            efficiency = self.objectives.efficiency,
            "optimization objectives updated"
        );
    }

    /// Rolling diagnostics snapshot. Side-effect free.
    pub fn get_diagnostics(&self) -> SuspensionDiagnostics {
        let mut utilization = [0.0; RuleId::COUNT];
        if self.cycles > 0 {
            for (out, count) in utilization.iter_mut().zip(self.rule_fire_counts.iter()) {
                *out = *count as f64 / self.cycles as f64;
            }
        }
        SuspensionDiagnostics {
            average_comfort_index: self.comfort_history.mean(),
            average_system_efficiency: self.efficiency_history.mean(),
            performance_trend: self.score_trend(),
            rule_utilization: utilization,
            cycles: self.cycles,
        }
    }

    /// Run one control cycle.
    ///
    /// `road_condition` and `driving_pattern` are optional preview/context
    /// feeds; when absent the controller works from the snapshot alone.
    ///
    /// # Errors
    ///
    /// Fails with a validation error naming the offending field and its
    /// valid bound; no state is mutated and no partial output is produced.
    pub fn calculate_advanced_optimal_control(
        &mut self,
        inputs: &SuspensionInputs,
        road_condition: Option<&RoadConditionData>,
        driving_pattern: Option<&DrivingPatternData>,
    ) -> Result<SuspensionOutputs> {
        validate_inputs(inputs)?;
        if let Some(road) = road_condition {
            validate_range!("upcoming_roughness", road.upcoming_roughness, 0.0, 1.0);
            validate_range!("road_confidence", road.confidence, 0.0, 1.0);
        }
        if let Some(pattern) = driving_pattern {
            validate_range!("aggressiveness", pattern.aggressiveness, 0.0, 1.0);
            validate_range!("smoothness", pattern.smoothness, 0.0, 1.0);
        }

        let stroke_speed = inputs.suspension_velocity_ms.abs();
        let roughness = self.effective_roughness(inputs, road_condition);

        // Base fuzzy control: weighted Sugeno blend over the rule base.
        let activations = self.rule_activations(inputs, stroke_speed, roughness);
        let mut blender = SugenoBlender::new();
        for rule in RuleId::all() {
            let activation = activations[rule.index()];
            blender.add(
                activation * self.adaptive.weight(rule),
                RULE_DAMPING_LEVELS[rule.index()],
            );
        }
        let mut damping_level = blender.crisp(NEUTRAL_DAMPING_LEVEL);

        // Predictive control: stiffen ahead of a rising roughness trend.
        damping_level *= 1.0 + self.anticipatory_stiffening();

        // Driving-style descriptors and corner load nudge the base level;
        // all are neutral at their default values.
        let style = 0.5 * inputs.cornering_pattern
            + 0.3 * inputs.braking_pattern
            + 0.2 * inputs.acceleration_pattern;
        damping_level *= 1.0 + 0.1 * style;
        damping_level *= 0.9 + 0.2 * inputs.vehicle_load_factor;
        if let Some(pattern) = driving_pattern {
            damping_level *= 1.0 + 0.1 * pattern.aggressiveness;
            damping_level *= 1.0 - 0.05 * pattern.smoothness;
        }

        // Energy recovery scales with stroke speed squared, grows with the
        // available mechanical energy on rough roads, and is biased up when
        // the storage is running empty.
        let storage_bias = 1.0 + (1.0 - inputs.energy_storage_level) * 0.4;
        let mut recovery_w =
            900.0 * stroke_speed * stroke_speed * (0.6 + 0.8 * roughness) * storage_bias;
        let thermal_factor = self.thermal_curve.evaluate(inputs.fluid_temperature_c);
        if thermal_factor < 0.2 {
            tracing::warn!(
                fluid_temperature_c = inputs.fluid_temperature_c,
                thermal_factor,
                "fluid thermal protection sharply limiting energy recovery"
            );
        }
        recovery_w *= thermal_factor;

        // Multi-objective blend over per-objective candidate multipliers.
        let (damping_multiplier, recovery_multiplier) = self.objective_multipliers();
        damping_level *= damping_multiplier;
        recovery_w *= recovery_multiplier;

        // Safety clamps are always applied last.
        let damping_coefficient =
            (damping_level * MAX_DAMPING_COEFFICIENT).clamp(0.0, MAX_DAMPING_COEFFICIENT);
        let recovery_w = recovery_w.clamp(0.0, MAX_ENERGY_RECOVERY_W);
        let valve_position = (0.15 + 0.7 * damping_level).clamp(0.0, 1.0);

        let comfort_index = (1.0
            - 0.45 * roughness
            - 0.25 * damping_level.min(1.0)
            - 0.2 * (inputs.vertical_acceleration_ms2.abs() / 50.0))
            .clamp(0.0, 1.0);
        let energy_efficiency = (self.cold_curve.evaluate(inputs.fluid_temperature_c)
            * (0.75 + 0.25 * stroke_speed.min(1.0)))
        .clamp(0.0, 1.0);
        let system_efficiency =
            (0.5 * energy_efficiency + 0.5 * comfort_index).clamp(0.0, 1.0);

        let outputs = SuspensionOutputs {
            damping_coefficient,
            energy_recovery_w: recovery_w,
            comfort_index,
            energy_efficiency,
            system_efficiency,
            valve_position,
        };

        self.record_cycle(inputs, stroke_speed, roughness, &activations, &outputs);
        Ok(outputs)
    }

    /// Roughness actually used for control: measured signal plus the
    /// surface-class bias, blended with a confident road preview.
    fn effective_roughness(
        &self,
        inputs: &SuspensionInputs,
        road_condition: Option<&RoadConditionData>,
    ) -> f64 {
        let mut roughness = inputs.road_roughness + inputs.surface_type.roughness_bias();
        if let Some(road) = road_condition {
            if road.confidence >= self.predictive.confidence_threshold {
                roughness = roughness.max(road.upcoming_roughness * road.confidence);
            }
        }
        roughness.clamp(0.0, 1.0)
    }

    fn rule_activations(
        &self,
        inputs: &SuspensionInputs,
        stroke_speed: f64,
        roughness: f64,
    ) -> [f64; RuleId::COUNT] {
        let velocity_low = self.velocity_low.degree(stroke_speed);
        let velocity_high = self.velocity_high.degree(stroke_speed);
        let smooth = self.roughness_smooth.degree(roughness);
        let rough = self.roughness_rough.degree(roughness);

        let mut activations = [0.0; RuleId::COUNT];
        activations[RuleId::LowVelocitySmoothRoad.index()] = velocity_low.min(smooth);
        activations[RuleId::LowVelocityRoughRoad.index()] = velocity_low.min(rough);
        activations[RuleId::HighVelocitySmoothRoad.index()] = velocity_high.min(smooth);
        activations[RuleId::HighVelocityRoughRoad.index()] = velocity_high.min(rough);
        activations[RuleId::EnergyStorageLow.index()] =
            (1.0 - inputs.energy_storage_level).clamp(0.0, 1.0);
        activations[RuleId::ThermalHot.index()] =
            self.thermal_hot.degree(inputs.fluid_temperature_c);
        match inputs.driving_mode {
            DrivingMode::Sport => activations[RuleId::SportModeStiffen.index()] = 1.0,
            DrivingMode::Comfort => activations[RuleId::ComfortModeSoften.index()] = 1.0,
            DrivingMode::Eco => activations[RuleId::ComfortModeSoften.index()] = 0.6,
        }
        activations
    }

    /// Fractional damping increase from the extrapolated roughness trend.
    ///
    /// Zero when the history is short or roughness is flat or falling.
    fn anticipatory_stiffening(&self) -> f64 {
        let len = self.road_samples.len();
        if len < MIN_TREND_SAMPLES {
            return 0.0;
        }
        let samples: Vec<f64> = self.road_samples.iter().map(|s| s.roughness).collect();
        let half = len / 2;
        let early: f64 = samples[..half].iter().sum::<f64>() / half as f64;
        let late: f64 = samples[half..].iter().sum::<f64>() / (len - half) as f64;
        let slope_per_sample = (late - early) / half as f64;
        if slope_per_sample <= 0.0 {
            return 0.0;
        }
        // Extrapolate over the horizon assuming one sample per update period.
        let predicted_rise =
            slope_per_sample / self.predictive.update_period_s * self.predictive.horizon_s;
        (predicted_rise * 2.0).clamp(0.0, MAX_ANTICIPATION)
    }

    /// Per-objective candidate multipliers for (damping, recovery), blended
    /// by the normalized objective weights.
    fn objective_multipliers(&self) -> (f64, f64) {
        // (damping, recovery) candidates: comfort softens and harvests less,
        // energy harvests aggressively, stability firms the damping.
        const CANDIDATES: [(f64, f64); 4] = [
            (0.75, 0.8),  // comfort
            (1.05, 1.25), // energy
            (1.2, 0.9),   // stability
            (0.95, 1.0),  // efficiency
        ];
        let weights = [
            self.objectives.comfort,
            self.objectives.energy,
            self.objectives.stability,
            self.objectives.efficiency,
        ];
        let mut damping = 0.0;
        let mut recovery = 0.0;
        for (weight, (d, r)) in weights.iter().zip(CANDIDATES.iter()) {
            damping += weight * d;
            recovery += weight * r;
        }
        (damping, recovery)
    }

    /// Push histories and run the adaptive-learning step for this cycle.
    fn record_cycle(
        &mut self,
        inputs: &SuspensionInputs,
        stroke_speed: f64,
        roughness: f64,
        activations: &[f64; RuleId::COUNT],
        outputs: &SuspensionOutputs,
    ) {
        self.cycles = self.cycles.saturating_add(1);
        self.road_samples.push(RoadSample {
            roughness,
            velocity: stroke_speed,
        });
        self.comfort_history.push(outputs.comfort_index);
        self.efficiency_history.push(outputs.system_efficiency);

        // Composite performance score in [0, 1], weighted like the
        // objectives so learning chases what the host actually asked for.
        let stability_term =
            (1.0 - inputs.suspension_displacement_m.abs() / 0.15).clamp(0.0, 1.0);
        let score = (self.objectives.comfort * outputs.comfort_index
            + self.objectives.energy * (outputs.energy_recovery_w / MAX_ENERGY_RECOVERY_W)
            + self.objectives.stability * stability_term
            + self.objectives.efficiency * outputs.energy_efficiency)
            .clamp(0.0, 1.0);
        self.score_history.push(score);

        let error = score - 0.5;
        if error.abs() < self.adaptive.adaptation_threshold {
            for (count, activation) in self.rule_fire_counts.iter_mut().zip(activations.iter()) {
                if *activation > 0.1 {
                    *count += 1;
                }
            }
            return;
        }
        let window = self.adaptive.history_window.max(1).min(self.score_history.len());
        let recent_score: f64 = self
            .score_history
            .iter()
            .skip(self.score_history.len() - window)
            .sum::<f64>()
            / window as f64;
        let recent_error = recent_score - 0.5;
        for rule in RuleId::all() {
            let activation = activations[rule.index()];
            if activation > 0.1 {
                self.rule_fire_counts[rule.index()] += 1;
            }
            let weight = &mut self.adaptive.rule_weights[rule.index()];
            *weight = (0.5
                + (*weight - 0.5) * self.adaptive.forgetting_factor
                + self.adaptive.learning_rate * recent_error * activation)
                .clamp(RULE_WEIGHT_MIN, RULE_WEIGHT_MAX);
        }
    }

    /// Compare the older half of the score history against the newer half.
    fn score_trend(&self) -> PerformanceTrend {
        let len = self.score_history.len();
        if len < MIN_TREND_SCORES {
            return PerformanceTrend::Stable;
        }
        let scores: Vec<f64> = self.score_history.iter().collect();
        let half = len / 2;
        let early: f64 = scores[..half].iter().sum::<f64>() / half as f64;
        let late: f64 = scores[half..].iter().sum::<f64>() / (len - half) as f64;
        if late - early > TREND_DEADBAND {
            PerformanceTrend::Improving
        } else if early - late > TREND_DEADBAND {
            PerformanceTrend::Declining
        } else {
            PerformanceTrend::Stable
        }
    }
}

fn validate_inputs(inputs: &SuspensionInputs) -> Result<()> {
    validate_range!("vehicle_speed_kmh", inputs.vehicle_speed_kmh, 0.0, 300.0);
    validate_range!(
        "vertical_acceleration_ms2",
        inputs.vertical_acceleration_ms2,
        -50.0,
        50.0
    );
    validate_range!(
        "suspension_velocity_ms",
        inputs.suspension_velocity_ms,
        -2.0,
        2.0
    );
    validate_range!(
        "suspension_displacement_m",
        inputs.suspension_displacement_m,
        -0.15,
        0.15
    );
    validate_range!("road_roughness", inputs.road_roughness, 0.0, 1.0);
    validate_range!("road_gradient", inputs.road_gradient, -0.3, 0.3);
    validate_range!("acceleration_pattern", inputs.acceleration_pattern, 0.0, 1.0);
    validate_range!("braking_pattern", inputs.braking_pattern, 0.0, 1.0);
    validate_range!("cornering_pattern", inputs.cornering_pattern, 0.0, 1.0);
    validate_range!(
        "hydraulic_pressure_bar",
        inputs.hydraulic_pressure_bar,
        0.0,
        350.0
    );
    validate_range!(
        "accumulator_pressure_bar",
        inputs.accumulator_pressure_bar,
        0.0,
        350.0
    );
    validate_range!("fluid_temperature_c", inputs.fluid_temperature_c, -40.0, 200.0);
    validate_range!("energy_storage_level", inputs.energy_storage_level, 0.0, 1.0);
    validate_range!(
        "ambient_temperature_c",
        inputs.ambient_temperature_c,
        -40.0,
        60.0
    );
    validate_range!("vehicle_load_factor", inputs.vehicle_load_factor, 0.0, 1.0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SurfaceType;

    fn must<T, E: std::fmt::Debug>(result: std::result::Result<T, E>) -> T {
        match result {
            Ok(value) => value,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn moderate_inputs() -> SuspensionInputs {
        SuspensionInputs {
            vehicle_speed_kmh: 80.0,
            suspension_velocity_ms: 0.4,
            road_roughness: 0.3,
            ..SuspensionInputs::default()
        }
    }

    #[test]
    fn test_outputs_within_actuator_bounds() {
        let mut controller = AdvancedSuspensionController::new();
        let inputs = SuspensionInputs {
            suspension_velocity_ms: 1.8,
            road_roughness: 1.0,
            driving_mode: DrivingMode::Sport,
            energy_storage_level: 0.0,
            ..SuspensionInputs::default()
        };
        let outputs = must(controller.calculate_advanced_optimal_control(&inputs, None, None));
        assert!(outputs.damping_coefficient <= MAX_DAMPING_COEFFICIENT);
        assert!(outputs.energy_recovery_w <= MAX_ENERGY_RECOVERY_W);
        assert!((0.0..=1.0).contains(&outputs.valve_position));
        assert!((0.0..=1.0).contains(&outputs.comfort_index));
        assert!((0.0..=1.0).contains(&outputs.energy_efficiency));
        assert!((0.0..=1.0).contains(&outputs.system_efficiency));
    }

    #[test]
    fn test_negative_vehicle_speed_rejected() {
        let mut controller = AdvancedSuspensionController::new();
        let inputs = SuspensionInputs {
            vehicle_speed_kmh: -1.0,
            ..SuspensionInputs::default()
        };
        let message = match controller.calculate_advanced_optimal_control(&inputs, None, None) {
            Ok(_) => panic!("negative speed must be rejected"),
            Err(e) => e.to_string(),
        };
        assert!(message.contains("vehicle_speed_kmh"));
    }

    #[test]
    fn test_failed_cycle_mutates_no_state() {
        let mut controller = AdvancedSuspensionController::new();
        let bad = SuspensionInputs {
            road_roughness: 1.5,
            ..SuspensionInputs::default()
        };
        assert!(controller
            .calculate_advanced_optimal_control(&bad, None, None)
            .is_err());
        assert_eq!(controller.get_diagnostics().cycles, 0);
        assert_eq!(
            controller.get_adaptive_parameters().rule_weights,
            AdaptiveParameters::default().rule_weights
        );
    }

    #[test]
    fn test_rough_road_firms_damping_and_raises_recovery() {
        // Scenario: identical inputs except roughness 0.1 vs 0.9.
        let mut smooth_controller = AdvancedSuspensionController::new();
        let mut rough_controller = AdvancedSuspensionController::new();
        let smooth_inputs = SuspensionInputs {
            road_roughness: 0.1,
            ..moderate_inputs()
        };
        let rough_inputs = SuspensionInputs {
            road_roughness: 0.9,
            ..moderate_inputs()
        };
        let smooth =
            must(smooth_controller.calculate_advanced_optimal_control(&smooth_inputs, None, None));
        let rough =
            must(rough_controller.calculate_advanced_optimal_control(&rough_inputs, None, None));
        assert!(rough.damping_coefficient > smooth.damping_coefficient);
        assert!(rough.energy_recovery_w > smooth.energy_recovery_w);
    }

    #[test]
    fn test_sport_mode_firmer_than_comfort() {
        let mut sport_controller = AdvancedSuspensionController::new();
        let mut comfort_controller = AdvancedSuspensionController::new();
        let sport_inputs = SuspensionInputs {
            driving_mode: DrivingMode::Sport,
            ..moderate_inputs()
        };
        let comfort_inputs = SuspensionInputs {
            driving_mode: DrivingMode::Comfort,
            ..moderate_inputs()
        };
        let sport =
            must(sport_controller.calculate_advanced_optimal_control(&sport_inputs, None, None));
        let comfort = must(
            comfort_controller.calculate_advanced_optimal_control(&comfort_inputs, None, None),
        );
        assert!(sport.damping_coefficient > comfort.damping_coefficient);
        assert!(sport.valve_position >= comfort.valve_position);
    }

    #[test]
    fn test_eco_mode_not_firmer_than_sport() {
        let mut eco_controller = AdvancedSuspensionController::new();
        let mut sport_controller = AdvancedSuspensionController::new();
        let eco = must(eco_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                driving_mode: DrivingMode::Eco,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        let sport = must(sport_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                driving_mode: DrivingMode::Sport,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        assert!(eco.damping_coefficient < sport.damping_coefficient);
    }

    #[test]
    fn test_low_storage_raises_recovery() {
        let mut low_controller = AdvancedSuspensionController::new();
        let mut full_controller = AdvancedSuspensionController::new();
        let low = must(low_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                energy_storage_level: 0.1,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        let full = must(full_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                energy_storage_level: 1.0,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        assert!(low.energy_recovery_w > full.energy_recovery_w);
    }

    #[test]
    fn test_hot_fluid_curtails_recovery() {
        let mut cool_controller = AdvancedSuspensionController::new();
        let mut hot_controller = AdvancedSuspensionController::new();
        let cool = must(cool_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                fluid_temperature_c: 25.0,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        let hot = must(hot_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                fluid_temperature_c: 130.0,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        assert!(hot.energy_recovery_w < cool.energy_recovery_w * 0.5);
    }

    #[test]
    fn test_edge_inputs_produce_defined_outputs() {
        let mut controller = AdvancedSuspensionController::new();
        let inputs = SuspensionInputs {
            suspension_velocity_ms: 0.0,
            road_roughness: 0.0,
            energy_storage_level: 1.0,
            vehicle_speed_kmh: 0.0,
            ..SuspensionInputs::default()
        };
        let outputs = must(controller.calculate_advanced_optimal_control(&inputs, None, None));
        assert!(outputs.damping_coefficient.is_finite());
        assert!(outputs.damping_coefficient >= 0.0);
        assert_eq!(outputs.energy_recovery_w, 0.0);
        assert!((0.0..=1.0).contains(&outputs.valve_position));
    }

    #[test]
    fn test_idempotent_without_learning_state() {
        // Two fresh controllers fed the same snapshot agree exactly.
        let mut a = AdvancedSuspensionController::new();
        let mut b = AdvancedSuspensionController::new();
        let inputs = moderate_inputs();
        let out_a = must(a.calculate_advanced_optimal_control(&inputs, None, None));
        let out_b = must(b.calculate_advanced_optimal_control(&inputs, None, None));
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_weights_diverge_under_varied_cycles_and_stay_bounded() {
        let mut controller = AdvancedSuspensionController::new();
        for i in 0..200 {
            let inputs = SuspensionInputs {
                suspension_velocity_ms: 0.3 + 0.5 * f64::from(i % 3),
                road_roughness: 0.2 + 0.2 * f64::from(i % 4),
                driving_mode: if i % 2 == 0 {
                    DrivingMode::Sport
                } else {
                    DrivingMode::Comfort
                },
                energy_storage_level: 0.3,
                ..SuspensionInputs::default()
            };
            must(controller.calculate_advanced_optimal_control(&inputs, None, None));
        }
        let params = controller.get_adaptive_parameters();
        let diverged = params
            .rule_weights
            .iter()
            .any(|w| (w - 0.5).abs() > 0.01);
        assert!(diverged, "weights stayed at initial values: {:?}", params.rule_weights);
        for weight in params.rule_weights {
            assert!((0.1..=1.0).contains(&weight));
        }
    }

    #[test]
    fn test_rising_roughness_triggers_anticipatory_stiffening() {
        // Feed a rising-roughness history, then compare the same snapshot
        // against a controller with a flat history.
        let mut rising = AdvancedSuspensionController::new();
        let mut flat = AdvancedSuspensionController::new();
        for i in 0..20 {
            let ramp = SuspensionInputs {
                road_roughness: 0.02 * f64::from(i),
                ..moderate_inputs()
            };
            must(rising.calculate_advanced_optimal_control(&ramp, None, None));
            let steady = SuspensionInputs {
                road_roughness: 0.19,
                ..moderate_inputs()
            };
            must(flat.calculate_advanced_optimal_control(&steady, None, None));
        }
        let probe = SuspensionInputs {
            road_roughness: 0.38,
            ..moderate_inputs()
        };
        let anticipating = must(rising.calculate_advanced_optimal_control(&probe, None, None));
        let reactive = must(flat.calculate_advanced_optimal_control(&probe, None, None));
        assert!(anticipating.damping_coefficient > reactive.damping_coefficient);
    }

    #[test]
    fn test_raising_energy_weight_raises_recovery() {
        let mut baseline = AdvancedSuspensionController::new();
        let mut energy_biased = AdvancedSuspensionController::new();
        energy_biased.update_optimization_objectives(&ObjectivesUpdate {
            energy: Some(0.8),
            ..ObjectivesUpdate::default()
        });
        let inputs = moderate_inputs();
        let base = must(baseline.calculate_advanced_optimal_control(&inputs, None, None));
        let biased = must(energy_biased.calculate_advanced_optimal_control(&inputs, None, None));
        assert!(biased.energy_recovery_w > base.energy_recovery_w);
    }

    #[test]
    fn test_objective_weights_stay_normalized_after_many_updates() {
        let mut controller = AdvancedSuspensionController::new();
        let updates = [
            ObjectivesUpdate {
                comfort: Some(0.9),
                ..ObjectivesUpdate::default()
            },
            ObjectivesUpdate {
                energy: Some(0.1),
                stability: Some(0.7),
                ..ObjectivesUpdate::default()
            },
            ObjectivesUpdate {
                efficiency: Some(2.0),
                ..ObjectivesUpdate::default()
            },
        ];
        for _ in 0..10 {
            for update in &updates {
                controller.update_optimization_objectives(update);
            }
        }
        assert!((controller.get_objectives().total() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_confident_road_preview_firms_damping() {
        let mut with_preview = AdvancedSuspensionController::new();
        let mut without_preview = AdvancedSuspensionController::new();
        let inputs = SuspensionInputs {
            road_roughness: 0.1,
            ..moderate_inputs()
        };
        let preview = RoadConditionData {
            upcoming_roughness: 0.9,
            confidence: 0.9,
        };
        let previewed = must(with_preview.calculate_advanced_optimal_control(
            &inputs,
            Some(&preview),
            None,
        ));
        let blind = must(without_preview.calculate_advanced_optimal_control(&inputs, None, None));
        assert!(previewed.damping_coefficient > blind.damping_coefficient);
    }

    #[test]
    fn test_low_confidence_preview_is_ignored() {
        let mut with_preview = AdvancedSuspensionController::new();
        let mut without_preview = AdvancedSuspensionController::new();
        let inputs = moderate_inputs();
        let preview = RoadConditionData {
            upcoming_roughness: 0.9,
            confidence: 0.2,
        };
        let previewed = must(with_preview.calculate_advanced_optimal_control(
            &inputs,
            Some(&preview),
            None,
        ));
        let blind = must(without_preview.calculate_advanced_optimal_control(&inputs, None, None));
        assert_eq!(previewed, blind);
    }

    #[test]
    fn test_gravel_surface_firmer_than_asphalt() {
        let mut gravel_controller = AdvancedSuspensionController::new();
        let mut asphalt_controller = AdvancedSuspensionController::new();
        let gravel = must(gravel_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                surface_type: SurfaceType::Gravel,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        let asphalt = must(asphalt_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                surface_type: SurfaceType::Asphalt,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        assert!(gravel.damping_coefficient > asphalt.damping_coefficient);
    }

    #[test]
    fn test_aggressive_style_firms_damping() {
        let mut aggressive_controller = AdvancedSuspensionController::new();
        let mut relaxed_controller = AdvancedSuspensionController::new();
        let aggressive = must(aggressive_controller.calculate_advanced_optimal_control(
            &SuspensionInputs {
                cornering_pattern: 0.9,
                braking_pattern: 0.8,
                ..moderate_inputs()
            },
            None,
            None,
        ));
        let relaxed = must(
            relaxed_controller.calculate_advanced_optimal_control(&moderate_inputs(), None, None),
        );
        assert!(aggressive.damping_coefficient > relaxed.damping_coefficient);
    }

    #[test]
    fn test_diagnostics_track_cycles_and_utilization() {
        let mut controller = AdvancedSuspensionController::new();
        for _ in 0..5 {
            must(controller.calculate_advanced_optimal_control(&moderate_inputs(), None, None));
        }
        let diag = controller.get_diagnostics();
        assert_eq!(diag.cycles, 5);
        assert!(diag.average_comfort_index > 0.0);
        assert!(diag.average_system_efficiency > 0.0);
        // The comfort-mode rule fires on every default-mode cycle.
        assert!(diag.rule_utilization[RuleId::ComfortModeSoften.index()] > 0.99);
    }

    #[test]
    fn test_custom_parameters_are_sanitized() {
        let custom = AdaptiveParameters {
            rule_weights: [5.0; RuleId::COUNT],
            ..AdaptiveParameters::default()
        };
        let controller =
            AdvancedSuspensionController::with_parameters(Some(custom), None, None);
        for weight in controller.get_adaptive_parameters().rule_weights {
            assert_eq!(weight, 1.0);
        }
    }
}
