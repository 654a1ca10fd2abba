//! The integrated system: one braking chain, four corners, one power
//! arbiter.

use openregen_braking::{FuzzyBrakingController, MotorLocation, VehicleParameters};
use openregen_curves::{presets, DeratingCurve};
use openregen_damper::{DamperConfig, HydraulicDamper};
use openregen_errors::prelude::*;
use openregen_suspension::AdvancedSuspensionController;

use crate::types::{
    CornerOutputs, EnergyBalance, IntegratedInputs, IntegratedOutputs, SystemConfiguration,
    SystemConfigurationUpdate, SystemDiagnostics, SystemHealth, CORNER_COUNT,
};

/// Control cycle period assumed for energy/time accounting, s.
const CYCLE_PERIOD_S: f64 = 0.01;

/// Valve actuation power at full valve command, W per corner.
const VALVE_ACTUATION_W: f64 = 25.0;

/// SOC window below the charging threshold over which recovery ramps to
/// zero.
const BATTERY_BACKOFF_WINDOW: f64 = 0.1;

/// One corner's controller/damper pair.
#[derive(Clone, Debug)]
struct Corner {
    suspension: AdvancedSuspensionController,
    damper: HydraulicDamper,
}

/// The integrated regenerative energy-recovery system.
///
/// Owns a braking controller, four suspension controller + damper pairs,
/// and the arbitration policy that caps their combined power. Single
/// threaded; callers must serialize access externally.
#[derive(Clone, Debug)]
pub struct IntegratedRegenSystem {
    braking: FuzzyBrakingController,
    corners: [Corner; CORNER_COUNT],
    config: SystemConfiguration,
    motor_thermal: DeratingCurve,
    damper_thermal: DeratingCurve,
    diagnostics: SystemDiagnostics,
}

impl IntegratedRegenSystem {
    /// Create a system for the given vehicle with the default arbitration
    /// policy and default damper characteristics.
    pub fn new(params: VehicleParameters) -> Self {
        Self::with_configuration(params, SystemConfiguration::default())
    }

    /// Create a system with an explicit arbitration configuration.
    pub fn with_configuration(params: VehicleParameters, config: SystemConfiguration) -> Self {
        let corner = Corner {
            suspension: AdvancedSuspensionController::new(),
            damper: HydraulicDamper::new(DamperConfig::default()),
        };
        Self {
            braking: FuzzyBrakingController::new(params),
            corners: [corner.clone(), corner.clone(), corner.clone(), corner],
            config,
            motor_thermal: presets::motor_thermal_derating(),
            damper_thermal: presets::damper_thermal_protection(),
            diagnostics: SystemDiagnostics::default(),
        }
    }

    /// The active arbitration configuration.
    pub fn configuration(&self) -> &SystemConfiguration {
        &self.config
    }

    /// Merge a partial configuration update.
    pub fn update_system_configuration(&mut self, update: &SystemConfigurationUpdate) {
        update.apply(&mut self.config);
        tracing::info!(
            prioritize_braking = self.config.prioritize_braking,
            max_combined_power_w = self.config.max_combined_power_w,
            battery_charging_threshold = self.config.battery_charging_threshold,
            thermal_management_enabled = self.config.thermal_management_enabled,
            "system configuration updated"
        );
    }

    /// Record a motor temperature from the host's sensor feed.
    ///
    /// # Errors
    ///
    /// Fails with a not-found error for a motor the vehicle does not have.
    pub fn update_motor_temperature(
        &mut self,
        location: MotorLocation,
        celsius: f64,
    ) -> Result<()> {
        self.braking.update_motor_temperature(location, celsius)
    }

    /// Snapshot of the cumulative system diagnostics.
    pub fn get_system_diagnostics(&self) -> SystemDiagnostics {
        self.diagnostics
    }

    /// Zero all cumulative statistics, including the per-damper counters.
    pub fn reset_system_statistics(&mut self) {
        self.diagnostics = SystemDiagnostics::default();
        for corner in &mut self.corners {
            corner.damper.reset_diagnostics();
        }
        tracing::info!("system statistics reset");
    }

    /// Run one integrated control cycle.
    ///
    /// Calls the braking chain once and each corner's suspension controller
    /// and damper model once, then derates (thermal, battery back-off) and
    /// caps the combined generated power according to the configured
    /// priority policy. The reported power fields carry the arbitrated
    /// values.
    ///
    /// # Errors
    ///
    /// Any component validation failure aborts the cycle with that
    /// component's error; the system-level diagnostics are not advanced.
    pub fn calculate_integrated_performance(
        &mut self,
        inputs: &IntegratedInputs,
    ) -> Result<IntegratedOutputs> {
        let mut braking_out = self.braking.calculate_optimal_braking(&inputs.braking)?;

        let mut corner_outputs = [CornerOutputs::default(); CORNER_COUNT];
        for (slot, (corner, corner_inputs)) in corner_outputs
            .iter_mut()
            .zip(self.corners.iter_mut().zip(inputs.corners.iter()))
        {
            let suspension = corner.suspension.calculate_advanced_optimal_control(
                &corner_inputs.suspension,
                None,
                None,
            )?;
            let damper = corner.damper.calculate_damper_performance(&corner_inputs.damper)?;
            *slot = CornerOutputs { suspension, damper };
        }

        let mut braking_power = braking_out.regenerated_power_w;
        let mut damper_powers = [0.0_f64; CORNER_COUNT];
        for (power, out) in damper_powers.iter_mut().zip(corner_outputs.iter()) {
            *power = out.damper.generated_power_w;
        }

        // Thermal management: an outer derating layer on top of each
        // component's own protection.
        let mut min_factor = 1.0_f64;
        if self.config.thermal_management_enabled {
            let motor_factor = self.motor_thermal.evaluate(inputs.braking.motor_temperature_c);
            braking_power *= motor_factor;
            min_factor = min_factor.min(motor_factor);
            for (power, corner_inputs) in damper_powers.iter_mut().zip(inputs.corners.iter()) {
                let factor = self
                    .damper_thermal
                    .evaluate(corner_inputs.damper.damper_temperature_c);
                *power *= factor;
                min_factor = min_factor.min(factor);
            }
        }

        // Battery back-off toward the charging threshold.
        let battery_factor = self.battery_backoff_factor(inputs.braking.battery_soc);
        braking_power *= battery_factor;
        for power in &mut damper_powers {
            *power *= battery_factor;
        }
        min_factor = min_factor.min(battery_factor);

        // Combined cap: the prioritized source keeps up to the full cap,
        // the other is scaled into the remainder.
        let damper_total: f64 = damper_powers.iter().sum();
        let raw_total = braking_power + damper_total;
        let cap = self.config.max_combined_power_w;
        let curtailed = raw_total > cap;
        if curtailed {
            tracing::warn!(
                raw_total_w = raw_total,
                cap_w = cap,
                prioritize_braking = self.config.prioritize_braking,
                "combined power cap engaged"
            );
            if self.config.prioritize_braking {
                braking_power = braking_power.min(cap);
                let remainder = (cap - braking_power).max(0.0);
                let scale = if damper_total > 0.0 {
                    (remainder / damper_total).min(1.0)
                } else {
                    0.0
                };
                for power in &mut damper_powers {
                    *power *= scale;
                }
            } else {
                let capped_damper = damper_total.min(cap);
                let scale = if damper_total > 0.0 {
                    capped_damper / damper_total
                } else {
                    0.0
                };
                for power in &mut damper_powers {
                    *power *= scale;
                }
                let remainder = (cap - capped_damper).max(0.0);
                braking_power = braking_power.min(remainder);
            }
        }

        braking_out.regenerated_power_w = braking_power;
        for (out, power) in corner_outputs.iter_mut().zip(damper_powers.iter()) {
            if out.damper.generated_power_w > 0.0 {
                let scale = power / out.damper.generated_power_w;
                out.damper.harvested_energy_j *= scale;
            }
            out.damper.generated_power_w = *power;
        }

        let damper_power_w: f64 = damper_powers.iter().sum();
        let total_consumed_power_w: f64 = corner_outputs
            .iter()
            .map(|c| c.suspension.valve_position * VALVE_ACTUATION_W)
            .sum();
        let energy_balance = EnergyBalance {
            regenerative_braking_power_w: braking_power,
            damper_power_w,
            total_generated_power_w: braking_power + damper_power_w,
            total_consumed_power_w,
        };

        let system_health = if curtailed || battery_factor <= 0.1 || min_factor < 0.2 {
            SystemHealth::Degraded
        } else if min_factor < 0.999 {
            SystemHealth::Good
        } else {
            SystemHealth::Excellent
        };

        self.diagnostics.cycles += 1;
        if curtailed {
            self.diagnostics.curtailment_events += 1;
        }
        self.diagnostics.total_energy_j +=
            energy_balance.total_generated_power_w * CYCLE_PERIOD_S;
        self.diagnostics.operating_time_s += CYCLE_PERIOD_S;
        self.diagnostics.system_health = system_health;

        Ok(IntegratedOutputs {
            braking: braking_out,
            corners: corner_outputs,
            energy_balance,
            system_health,
        })
    }

    /// Scaling factor ramping recovery to zero as SOC approaches the
    /// charging threshold.
    fn battery_backoff_factor(&self, soc: f64) -> f64 {
        let threshold = self.config.battery_charging_threshold;
        if soc >= threshold {
            0.0
        } else if soc > threshold - BATTERY_BACKOFF_WINDOW {
            (threshold - soc) / BATTERY_BACKOFF_WINDOW
        } else {
            1.0
        }
    }
}
