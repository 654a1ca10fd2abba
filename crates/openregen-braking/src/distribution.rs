//! Torque distribution across drive motors.
//!
//! Splits a braking-force demand between the drive motors and the friction
//! brakes. Per-motor torque passes through four limits, in order: the hard
//! torque ceiling, the speed-dependent power ceiling (τ ≤ P/ω), thermal
//! derating from the motor's tracked winding temperature, and battery
//! charge acceptance. Whatever force the motors cannot take is assigned to
//! the mechanical brakes, which keeps force conservation exact.

use openregen_curves::{DeratingCurve, presets};
use openregen_errors::prelude::*;
use openregen_errors::validate_range;
use serde::{Deserialize, Serialize};

use crate::types::{MotorCount, MotorLocation, VehicleParameters};

/// Wheel angular speeds below this are treated as standstill for the power
/// ceiling (τ ≤ P/ω diverges as ω → 0).
const STANDSTILL_OMEGA_RPS: f64 = 0.1;

/// Result of one distribution pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TorqueDistribution {
    /// Commanded torque per motor, N·m, ordered as
    /// [`VehicleParameters::motor_locations`].
    pub motor_torques_nm: Vec<f64>,
    /// Wheel force realized by the motors, N.
    pub total_motor_force_n: f64,
    /// Friction-brake make-up force, N, ≥ 0.
    pub mechanical_force_n: f64,
    /// Electrical power recovered, W, ≥ 0.
    pub regenerated_power_w: f64,
}

/// Distributes braking force across motors under torque/power/thermal/SOC
/// limits, and tracks per-motor winding temperatures fed by the host.
#[derive(Clone, Debug)]
pub struct TorqueDistributionModel {
    params: VehicleParameters,
    motor_temperatures: Vec<(MotorLocation, f64)>,
    thermal_curve: DeratingCurve,
    charge_curve: DeratingCurve,
    recovery_curve: DeratingCurve,
}

impl TorqueDistributionModel {
    /// Ambient temperature assumed for motors before the first update.
    pub const INITIAL_MOTOR_TEMPERATURE_C: f64 = 25.0;

    /// Create a model for the given vehicle.
    pub fn new(params: VehicleParameters) -> Self {
        let motor_temperatures = params
            .motor_locations()
            .into_iter()
            .map(|location| (location, Self::INITIAL_MOTOR_TEMPERATURE_C))
            .collect();
        Self {
            params,
            motor_temperatures,
            thermal_curve: presets::motor_thermal_derating(),
            charge_curve: presets::soc_charge_acceptance(),
            recovery_curve: presets::speed_recovery_efficiency(),
        }
    }

    /// The vehicle parameters this model was built with.
    pub fn params(&self) -> &VehicleParameters {
        &self.params
    }

    /// Record a motor winding temperature from the host's sensor feed.
    ///
    /// # Errors
    ///
    /// Fails with a not-found error for a motor the configuration does not
    /// have (e.g. a rear motor on a two-motor vehicle), or with a
    /// validation error for an out-of-range temperature.
    pub fn update_motor_temperature(
        &mut self,
        location: MotorLocation,
        celsius: f64,
    ) -> Result<()> {
        validate_range!("motor_temperature_c", celsius, -40.0, 200.0);
        let entry = self
            .motor_temperatures
            .iter_mut()
            .find(|(l, _)| *l == location);
        match entry {
            Some((_, temperature)) => {
                *temperature = celsius;
                Ok(())
            }
            None => Err(ControlError::not_found("motor", location).into()),
        }
    }

    /// Current tracked temperature of a motor, if fitted.
    pub fn motor_temperature(&self, location: MotorLocation) -> Option<f64> {
        self.motor_temperatures
            .iter()
            .find(|(l, _)| *l == location)
            .map(|&(_, t)| t)
    }

    /// Distribute a braking-force demand between motors and friction
    /// brakes.
    ///
    /// # Errors
    ///
    /// Fails with a field-specific validation error for out-of-range
    /// inputs; no partial output is produced.
    pub fn calculate_torque_distribution(
        &self,
        demanded_force_n: f64,
        vehicle_speed_mps: f64,
        regen_ratio: f64,
        battery_soc: f64,
    ) -> Result<TorqueDistribution> {
        validate_range!("demanded_force_n", demanded_force_n, 0.0, 1.0e6);
        validate_range!("vehicle_speed_mps", vehicle_speed_mps, 0.0, 85.0);
        validate_range!("regen_ratio", regen_ratio, 0.0, 1.0);
        validate_range!("battery_soc", battery_soc, 0.0, 1.0);

        self.distribute(
            demanded_force_n,
            vehicle_speed_mps,
            regen_ratio,
            self.charge_curve.evaluate(battery_soc),
            |_| 1.0,
        )
    }

    /// Stability-optimized distribution for cornering: the outer wheels'
    /// torque is reduced proportionally to lateral acceleration so the
    /// regenerative drag does not destabilize the turn. Straight-line
    /// braking (zero lateral acceleration) applies no adjustment.
    ///
    /// # Errors
    ///
    /// Fails with a field-specific validation error for out-of-range
    /// inputs.
    pub fn calculate_stability_optimized_distribution(
        &self,
        demanded_force_n: f64,
        vehicle_speed_mps: f64,
        lateral_accel_mps2: f64,
        yaw_rate_rps: f64,
    ) -> Result<TorqueDistribution> {
        validate_range!("demanded_force_n", demanded_force_n, 0.0, 1.0e6);
        validate_range!("vehicle_speed_mps", vehicle_speed_mps, 0.0, 85.0);
        validate_range!("lateral_accel_mps2", lateral_accel_mps2, -15.0, 15.0);
        validate_range!("yaw_rate_rps", yaw_rate_rps, -5.0, 5.0);

        let outer_factor =
            (1.0 - (0.1 * lateral_accel_mps2.abs() + 0.02 * yaw_rate_rps.abs())).max(0.35);
        // Lateral acceleration toward the turn center: positive when the
        // vehicle turns left, which puts the outer wheels on the right.
        let outer_is_right = lateral_accel_mps2 > 0.0;

        self.distribute(demanded_force_n, vehicle_speed_mps, 1.0, 1.0, |location| {
            if lateral_accel_mps2.abs() < f64::EPSILON {
                1.0
            } else if location.is_left() != outer_is_right {
                // This wheel is on the outer side of the turn.
                outer_factor
            } else {
                1.0
            }
        })
    }

    fn distribute<F>(
        &self,
        demanded_force_n: f64,
        vehicle_speed_mps: f64,
        regen_ratio: f64,
        charge_factor: f64,
        side_factor: F,
    ) -> Result<TorqueDistribution>
    where
        F: Fn(MotorLocation) -> f64,
    {
        let radius = self.params.wheel_radius_m;
        let omega = vehicle_speed_mps / radius;
        let regen_force_target = demanded_force_n * regen_ratio;

        let mut motor_torques_nm = Vec::with_capacity(self.motor_temperatures.len());
        for &(location, temperature) in &self.motor_temperatures {
            let share = self.axle_share(location);
            let mut torque = regen_force_target * share * radius;

            // 1. Hard per-motor ceiling.
            torque = torque.min(self.params.max_motor_torque_nm);
            // 2. Speed-dependent power ceiling.
            if omega > STANDSTILL_OMEGA_RPS {
                torque = torque.min(self.params.max_motor_power_w / omega);
            }
            // 3. Thermal derating from the tracked winding temperature.
            let thermal_factor = self.thermal_curve.evaluate(temperature);
            if thermal_factor < 0.2 {
                tracing::warn!(
                    motor = %location,
                    temperature_c = temperature,
                    "motor torque collapsed by thermal derating"
                );
            }
            torque *= thermal_factor;
            // 4. Battery charge acceptance.
            torque *= charge_factor;
            // Cornering stability adjustment, identity for the base path.
            torque *= side_factor(location);

            motor_torques_nm.push(torque.max(0.0));
        }

        let total_motor_force_n: f64 = motor_torques_nm.iter().map(|t| t / radius).sum();
        let mechanical_force_n = (demanded_force_n - total_motor_force_n).max(0.0);

        let recovery_efficiency = self.recovery_curve.evaluate(vehicle_speed_mps);
        let total_torque: f64 = motor_torques_nm.iter().sum();
        let regenerated_power_w =
            total_torque * omega * recovery_efficiency * self.params.drivetrain_efficiency;

        Ok(TorqueDistribution {
            motor_torques_nm,
            total_motor_force_n,
            mechanical_force_n,
            regenerated_power_w: regenerated_power_w.max(0.0),
        })
    }

    /// Fraction of the regenerative force target carried by one motor.
    fn axle_share(&self, location: MotorLocation) -> f64 {
        match self.params.motor_count {
            // Front motors take the whole electrical share.
            MotorCount::Two => 0.5,
            MotorCount::Four => {
                if location.is_front() {
                    self.params.front_axle_weight_ratio / 2.0
                } else {
                    (1.0 - self.params.front_axle_weight_ratio) / 2.0
                }
            }
        }
    }
}
