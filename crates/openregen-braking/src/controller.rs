//! Fuzzy regenerative braking controller.
//!
//! A zero-order Sugeno system over four input variables. Braking intensity
//! and vehicle speed drive the main rule base (how much of the demand is
//! worth taking electrically at this operating point); battery state of
//! charge and motor temperature each contribute a back-off factor from
//! their own small rule sets. Heavy braking keeps a guaranteed mechanical
//! fraction for deceleration authority regardless of everything else.

use openregen_errors::prelude::*;
use openregen_errors::validate_range;
use openregen_fuzzy::{MembershipFunction, SugenoBlender};

use crate::distribution::TorqueDistributionModel;
use crate::types::{BrakingInputs, BrakingOutputs, MotorLocation, VehicleParameters};

/// Regen ratio ceiling under heavy braking (intensity ≥ 0.8): at least 45%
/// of the demand always goes to the friction brakes.
const HEAVY_BRAKING_RATIO_CEILING: f64 = 0.55;
const HEAVY_BRAKING_INTENSITY: f64 = 0.8;

/// Membership sets for one fuzzified input variable.
#[derive(Clone, Copy, Debug)]
struct VariableSets<const N: usize> {
    sets: [MembershipFunction; N],
}

impl<const N: usize> VariableSets<N> {
    fn degrees(&self, x: f64) -> [f64; N] {
        let mut out = [0.0; N];
        for (degree, set) in out.iter_mut().zip(self.sets.iter()) {
            *degree = set.degree(x);
        }
        out
    }
}

/// The fuzzy braking controller: per-cycle inputs in, a complete braking
/// command (regen ratio, motor torques, friction make-up) out.
#[derive(Clone, Debug)]
pub struct FuzzyBrakingController {
    speed_sets: VariableSets<3>,      // low / medium / high (km/h)
    intensity_sets: VariableSets<3>,  // light / moderate / heavy
    soc_sets: VariableSets<4>,        // low / medium / high / full
    temperature_sets: VariableSets<3>, // normal / warm / hot (C)
    distribution: TorqueDistributionModel,
}

fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> MembershipFunction {
    MembershipFunction::trapezoidal(a, b, c, d)
        .unwrap_or(MembershipFunction::Trapezoidal { a, b, c, d })
}

fn triangle(a: f64, b: f64, c: f64) -> MembershipFunction {
    MembershipFunction::triangular(a, b, c).unwrap_or(MembershipFunction::Triangular { a, b, c })
}

impl FuzzyBrakingController {
    /// Create a controller for the given vehicle.
    pub fn new(params: VehicleParameters) -> Self {
        Self {
            speed_sets: VariableSets {
                sets: [
                    trapezoid(0.0, 0.0, 20.0, 50.0),
                    triangle(30.0, 65.0, 100.0),
                    trapezoid(80.0, 120.0, 200.0, 200.0),
                ],
            },
            intensity_sets: VariableSets {
                sets: [
                    trapezoid(0.0, 0.0, 0.2, 0.4),
                    triangle(0.3, 0.5, 0.7),
                    trapezoid(0.6, 0.8, 1.0, 1.0),
                ],
            },
            soc_sets: VariableSets {
                sets: [
                    trapezoid(0.0, 0.0, 0.2, 0.4),
                    triangle(0.3, 0.5, 0.7),
                    triangle(0.6, 0.8, 0.95),
                    trapezoid(0.9, 0.97, 1.0, 1.0),
                ],
            },
            temperature_sets: VariableSets {
                sets: [
                    trapezoid(-40.0, -40.0, 60.0, 90.0),
                    triangle(80.0, 110.0, 140.0),
                    trapezoid(120.0, 150.0, 200.0, 200.0),
                ],
            },
            distribution: TorqueDistributionModel::new(params),
        }
    }

    /// Access the owned torque distribution model.
    pub fn distribution_model(&self) -> &TorqueDistributionModel {
        &self.distribution
    }

    /// Record a motor temperature from the host's sensor feed.
    ///
    /// # Errors
    ///
    /// See [`TorqueDistributionModel::update_motor_temperature`].
    pub fn update_motor_temperature(
        &mut self,
        location: MotorLocation,
        celsius: f64,
    ) -> Result<()> {
        self.distribution.update_motor_temperature(location, celsius)
    }

    /// Run one braking control cycle.
    ///
    /// Validates every input field against its documented range and fails
    /// fast without partial output. Zero braking intensity returns a fully
    /// zeroed command (no demand means no split to compute).
    ///
    /// # Errors
    ///
    /// Fails with a validation error naming the offending field and its
    /// bounds.
    pub fn calculate_optimal_braking(&mut self, inputs: &BrakingInputs) -> Result<BrakingOutputs> {
        validate_range!("vehicle_speed_kmh", inputs.vehicle_speed_kmh, 0.0, 200.0);
        validate_range!("braking_intensity", inputs.braking_intensity, 0.0, 1.0);
        validate_range!("battery_soc", inputs.battery_soc, 0.0, 1.0);
        validate_range!(
            "motor_temperature_c",
            inputs.motor_temperature_c,
            -40.0,
            200.0
        );

        let motor_count = self.distribution.params().motor_count.count();
        // Intensity is validated non-negative above.
        if inputs.braking_intensity <= 0.0 {
            return Ok(BrakingOutputs::zeroed(motor_count));
        }

        let regen_ratio = self.infer_regen_ratio(inputs);

        let demand_n =
            inputs.braking_intensity * self.distribution.params().max_service_brake_force_n;
        let speed_mps = inputs.vehicle_speed_kmh / 3.6;
        let dist = self.distribution.calculate_torque_distribution(
            demand_n,
            speed_mps,
            regen_ratio,
            inputs.battery_soc,
        )?;

        Ok(BrakingOutputs {
            regen_ratio,
            motor_torques_nm: dist.motor_torques_nm,
            mechanical_brake_force_n: dist.mechanical_force_n,
            regenerated_power_w: dist.regenerated_power_w,
        })
    }

    /// Defuzzify the regenerative ratio for the given operating point.
    fn infer_regen_ratio(&self, inputs: &BrakingInputs) -> f64 {
        let [speed_low, speed_medium, speed_high] = self.speed_sets.degrees(inputs.vehicle_speed_kmh);
        let [light, moderate, heavy] = self.intensity_sets.degrees(inputs.braking_intensity);

        // Main rule base: intensity x speed -> regen level singleton.
        // Recuperation is most effective in the medium speed band; heavy
        // braking always leans on the friction brakes.
        let mut base = SugenoBlender::new();
        base.add(light * speed_low, 0.7);
        base.add(light * speed_medium, 0.88);
        base.add(light * speed_high, 0.8);
        base.add(moderate * speed_low, 0.5);
        base.add(moderate * speed_medium, 0.75);
        base.add(moderate * speed_high, 0.62);
        base.add(heavy * speed_low, 0.3);
        base.add(heavy * speed_medium, 0.45);
        base.add(heavy * speed_high, 0.32);
        let base_ratio = base.crisp(0.5);

        // Battery back-off: near-zero acceptance at a full pack.
        let [soc_low, soc_medium, soc_high, soc_full] = self.soc_sets.degrees(inputs.battery_soc);
        let mut soc = SugenoBlender::new();
        soc.add(soc_low, 1.0);
        soc.add(soc_medium, 0.92);
        soc.add(soc_high, 0.55);
        soc.add(soc_full, 0.04);
        let soc_factor = soc.crisp(1.0);

        // Thermal back-off above the warm threshold.
        let [temp_normal, temp_warm, temp_hot] =
            self.temperature_sets.degrees(inputs.motor_temperature_c);
        let mut temp = SugenoBlender::new();
        temp.add(temp_normal, 1.0);
        temp.add(temp_warm, 0.55);
        temp.add(temp_hot, 0.08);
        let temp_factor = temp.crisp(1.0);

        let mut ratio = (base_ratio * soc_factor * temp_factor).clamp(0.0, 1.0);
        if inputs.braking_intensity >= HEAVY_BRAKING_INTENSITY {
            ratio = ratio.min(HEAVY_BRAKING_RATIO_CEILING);
        }
        ratio
    }
}
