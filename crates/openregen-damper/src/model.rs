//! The damper physical model.

use openregen_curves::{DeratingCurve, presets};
use openregen_errors::prelude::*;
use openregen_errors::validate_range;

use crate::types::{DamperConfig, DamperDiagnostics, DamperInputs, DamperOutputs};

/// One corner's hydraulic electromagnetic damper.
///
/// Pure per-call physics except for the cumulative [`DamperDiagnostics`]
/// updated as a side effect of every successful evaluation.
#[derive(Clone, Debug)]
pub struct HydraulicDamper {
    config: DamperConfig,
    thermal_protection: DeratingCurve,
    charge_acceptance: DeratingCurve,
    temperature_efficiency: DeratingCurve,
    diagnostics: DamperDiagnostics,
}

impl HydraulicDamper {
    /// Create a damper with the given characteristics.
    pub fn new(config: DamperConfig) -> Self {
        Self {
            config,
            thermal_protection: presets::damper_thermal_protection(),
            charge_acceptance: presets::soc_charge_acceptance(),
            temperature_efficiency: presets::cold_efficiency(),
            diagnostics: DamperDiagnostics::default(),
        }
    }

    /// The configuration this damper was built with.
    pub fn config(&self) -> &DamperConfig {
        &self.config
    }

    /// Snapshot of the cumulative diagnostics.
    pub fn get_diagnostics(&self) -> DamperDiagnostics {
        self.diagnostics
    }

    /// Zero the cumulative diagnostics.
    pub fn reset_diagnostics(&mut self) {
        self.diagnostics = DamperDiagnostics::default();
    }

    /// Evaluate the damper for one control cycle.
    ///
    /// # Errors
    ///
    /// Fails with a field-specific validation error for any out-of-range
    /// input; diagnostics are not updated on a failed cycle.
    pub fn calculate_damper_performance(
        &mut self,
        inputs: &DamperInputs,
    ) -> Result<DamperOutputs> {
        validate_range!(
            "compression_velocity_mps",
            inputs.compression_velocity_mps,
            -2.0,
            2.0
        );
        validate_range!("displacement_m", inputs.displacement_m, -0.15, 0.15);
        validate_range!("vehicle_speed_kmh", inputs.vehicle_speed_kmh, 0.0, 300.0);
        validate_range!("road_roughness", inputs.road_roughness, 0.0, 1.0);
        validate_range!(
            "damper_temperature_c",
            inputs.damper_temperature_c,
            -40.0,
            200.0
        );
        validate_range!("battery_soc", inputs.battery_soc, 0.0, 1.0);
        validate_range!("load_factor", inputs.load_factor, 0.0, 1.0);

        let config = &self.config;
        // Both strokes generate; only the stroke magnitude matters.
        let stroke_speed = inputs.compression_velocity_mps.abs();

        // Electromagnetic braking force on the armature. Deliberately
        // independent of battery SOC: the controller shunts excess current
        // to keep the force characteristic stable when the pack is full.
        let electromagnetic_force_n = (config.em_force_constant
            * stroke_speed
            * (1.0 + 0.15 * inputs.road_roughness))
            .clamp(0.0, config.max_em_force_n);

        // Hydraulic (viscous) force grows with corner load and roughness.
        let hydraulic_force_n = config.base_damping_coefficient
            * stroke_speed
            * (1.0 + 0.5 * inputs.road_roughness)
            * (0.8 + 0.4 * inputs.load_factor);

        let damping_force_n =
            (hydraulic_force_n + electromagnetic_force_n).clamp(0.0, config.max_damping_force_n);

        // Electrical path: raw EM power, conversion losses, then the two
        // back-offs (charge acceptance, thermal protection above ~100 C).
        let raw_power_w = config.em_force_constant * stroke_speed * stroke_speed;
        let charge_factor = self.charge_acceptance.evaluate(inputs.battery_soc);
        let thermal_factor = self.thermal_protection.evaluate(inputs.damper_temperature_c);
        let generated_power_w = (raw_power_w
            * config.conversion_efficiency
            * charge_factor
            * thermal_factor)
            .clamp(0.0, config.max_power_w);

        let energy_efficiency = (config.conversion_efficiency
            * self
                .temperature_efficiency
                .evaluate(inputs.damper_temperature_c))
        .clamp(0.0, 1.0);

        // Self-heating from the dissipated mechanical power, cooled by
        // airflow as vehicle speed rises.
        let mechanical_power_w = damping_force_n * stroke_speed;
        let dissipation = config.base_dissipation_w_per_c
            + config.speed_dissipation_w_per_c_kmh * inputs.vehicle_speed_kmh;
        let temperature_rise_c = if dissipation > 0.0 {
            mechanical_power_w / dissipation
        } else {
            0.0
        };
        let system_temperature_c = inputs.damper_temperature_c + temperature_rise_c;

        let hydraulic_pressure_pa = if config.piston_area_m2 > 0.0 {
            damping_force_n / config.piston_area_m2
        } else {
            0.0
        };

        let harvested_energy_j = generated_power_w * config.cycle_period_s;
        self.diagnostics.total_energy_harvested_j += harvested_energy_j;
        self.diagnostics.operation_cycles += 1;

        Ok(DamperOutputs {
            generated_power_w,
            damping_force_n,
            electromagnetic_force_n,
            hydraulic_pressure_pa,
            harvested_energy_j,
            energy_efficiency,
            system_temperature_c,
        })
    }
}

impl Default for HydraulicDamper {
    fn default() -> Self {
        Self::new(DamperConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn must<T, E: std::fmt::Debug>(result: std::result::Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn nominal() -> DamperInputs {
        DamperInputs {
            compression_velocity_mps: 0.5,
            displacement_m: 0.05,
            vehicle_speed_kmh: 60.0,
            road_roughness: 0.2,
            damper_temperature_c: 20.0,
            battery_soc: 0.3,
            load_factor: 0.5,
        }
    }

    #[test]
    fn test_scenario_nominal_corner() {
        // compressionVelocity=0.5, displacement=0.05, vehicleSpeed=60,
        // roughness=0.2, temperature=20, SOC=0.3, load=0.5
        // => energyEfficiency > 0.7 and generatedPower > 100 W
        let mut damper = HydraulicDamper::default();
        let out = must(damper.calculate_damper_performance(&nominal()));
        assert!(out.energy_efficiency > 0.7, "efficiency {}", out.energy_efficiency);
        assert!(out.generated_power_w > 100.0, "power {}", out.generated_power_w);
    }

    #[test]
    fn test_power_symmetric_in_stroke_direction() {
        let mut damper = HydraulicDamper::default();
        let compression = must(damper.calculate_damper_performance(&nominal()));
        let extension = must(damper.calculate_damper_performance(&DamperInputs {
            compression_velocity_mps: -0.5,
            ..nominal()
        }));
        assert_abs_diff_eq!(
            compression.generated_power_w,
            extension.generated_power_w,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            compression.damping_force_n,
            extension.damping_force_n,
            epsilon = 1e-9
        );
        assert!(extension.generated_power_w > 0.0);
    }

    #[test]
    fn test_power_scales_with_stroke_speed() {
        let mut damper = HydraulicDamper::default();
        let slow = must(damper.calculate_damper_performance(&DamperInputs {
            compression_velocity_mps: 0.2,
            ..nominal()
        }));
        let fast = must(damper.calculate_damper_performance(&DamperInputs {
            compression_velocity_mps: 0.8,
            ..nominal()
        }));
        assert!(fast.generated_power_w > slow.generated_power_w);
        assert!(fast.electromagnetic_force_n > slow.electromagnetic_force_n);
    }

    #[test]
    fn test_damping_force_grows_with_load_and_roughness() {
        let mut damper = HydraulicDamper::default();
        let light = must(damper.calculate_damper_performance(&DamperInputs {
            load_factor: 0.1,
            road_roughness: 0.1,
            ..nominal()
        }));
        let heavy = must(damper.calculate_damper_performance(&DamperInputs {
            load_factor: 0.9,
            road_roughness: 0.9,
            ..nominal()
        }));
        assert!(heavy.damping_force_n > light.damping_force_n);
    }

    #[test]
    fn test_power_backs_off_with_soc_but_force_does_not() {
        let mut damper = HydraulicDamper::default();
        let low_soc = must(damper.calculate_damper_performance(&DamperInputs {
            battery_soc: 0.2,
            ..nominal()
        }));
        let high_soc = must(damper.calculate_damper_performance(&DamperInputs {
            battery_soc: 0.95,
            ..nominal()
        }));
        assert!(high_soc.generated_power_w < low_soc.generated_power_w);

        // Damping force is essentially SOC-independent (< 10% difference).
        let force_delta =
            (high_soc.damping_force_n - low_soc.damping_force_n).abs() / low_soc.damping_force_n;
        assert!(force_delta < 0.1, "force delta {}", force_delta);
    }

    #[test]
    fn test_thermal_protection_curtails_power_above_100() {
        let mut damper = HydraulicDamper::default();
        let normal = must(damper.calculate_damper_performance(&nominal()));
        let hot = must(damper.calculate_damper_performance(&DamperInputs {
            damper_temperature_c: 120.0,
            ..nominal()
        }));
        assert!(hot.generated_power_w < normal.generated_power_w * 0.35);
    }

    #[test]
    fn test_extreme_cold_reduces_efficiency() {
        let mut damper = HydraulicDamper::default();
        let normal = must(damper.calculate_damper_performance(&nominal()));
        let frozen = must(damper.calculate_damper_performance(&DamperInputs {
            damper_temperature_c: -35.0,
            ..nominal()
        }));
        assert!(frozen.energy_efficiency < normal.energy_efficiency);
    }

    #[test]
    fn test_airflow_cools_at_speed() {
        let mut damper = HydraulicDamper::default();
        let parked = must(damper.calculate_damper_performance(&DamperInputs {
            vehicle_speed_kmh: 0.0,
            ..nominal()
        }));
        let highway = must(damper.calculate_damper_performance(&DamperInputs {
            vehicle_speed_kmh: 120.0,
            ..nominal()
        }));
        let parked_rise = parked.system_temperature_c - nominal().damper_temperature_c;
        let highway_rise = highway.system_temperature_c - nominal().damper_temperature_c;
        assert!(highway_rise < parked_rise);
        assert!(parked_rise > 0.0);
    }

    #[test]
    fn test_outputs_clamped_at_extremes() {
        let mut damper = HydraulicDamper::default();
        let out = must(damper.calculate_damper_performance(&DamperInputs {
            compression_velocity_mps: 2.0,
            displacement_m: 0.15,
            vehicle_speed_kmh: 10.0,
            road_roughness: 1.0,
            damper_temperature_c: 25.0,
            battery_soc: 0.0,
            load_factor: 1.0,
        }));
        assert!(out.generated_power_w <= 1500.0);
        assert!(out.damping_force_n <= 8000.0);
        assert!(out.electromagnetic_force_n <= 2000.0);
        assert!(out.generated_power_w >= 0.0);
    }

    #[test]
    fn test_zero_velocity_produces_defined_zero_outputs() {
        let mut damper = HydraulicDamper::default();
        let out = must(damper.calculate_damper_performance(&DamperInputs {
            compression_velocity_mps: 0.0,
            ..nominal()
        }));
        assert_eq!(out.generated_power_w, 0.0);
        assert_eq!(out.damping_force_n, 0.0);
        assert_eq!(out.electromagnetic_force_n, 0.0);
        assert!((out.system_temperature_c - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagnostics_accumulate_and_reset() {
        let mut damper = HydraulicDamper::default();
        for _ in 0..5 {
            let _ = must(damper.calculate_damper_performance(&nominal()));
        }
        let diag = damper.get_diagnostics();
        assert_eq!(diag.operation_cycles, 5);
        assert!(diag.total_energy_harvested_j > 0.0);

        damper.reset_diagnostics();
        let diag = damper.get_diagnostics();
        assert_eq!(diag.operation_cycles, 0);
        assert_eq!(diag.total_energy_harvested_j, 0.0);
    }

    #[test]
    fn test_failed_cycle_leaves_diagnostics_untouched() {
        let mut damper = HydraulicDamper::default();
        let _ = must(damper.calculate_damper_performance(&nominal()));
        let before = damper.get_diagnostics();
        let result = damper.calculate_damper_performance(&DamperInputs {
            compression_velocity_mps: 3.0,
            ..nominal()
        });
        assert!(result.is_err());
        assert_eq!(damper.get_diagnostics(), before);
    }

    #[test]
    fn test_each_field_validated_with_name() {
        let mut damper = HydraulicDamper::default();
        let cases: Vec<(DamperInputs, &str)> = vec![
            (
                DamperInputs {
                    compression_velocity_mps: -2.5,
                    ..nominal()
                },
                "compression_velocity_mps",
            ),
            (
                DamperInputs {
                    displacement_m: 0.2,
                    ..nominal()
                },
                "displacement_m",
            ),
            (
                DamperInputs {
                    vehicle_speed_kmh: 301.0,
                    ..nominal()
                },
                "vehicle_speed_kmh",
            ),
            (
                DamperInputs {
                    road_roughness: 1.1,
                    ..nominal()
                },
                "road_roughness",
            ),
            (
                DamperInputs {
                    damper_temperature_c: -41.0,
                    ..nominal()
                },
                "damper_temperature_c",
            ),
            (
                DamperInputs {
                    battery_soc: 1.01,
                    ..nominal()
                },
                "battery_soc",
            ),
            (
                DamperInputs {
                    load_factor: -0.1,
                    ..nominal()
                },
                "load_factor",
            ),
        ];
        for (inputs, field) in cases {
            let msg = match damper.calculate_damper_performance(&inputs) {
                Err(e) => e.to_string(),
                Ok(_) => panic!("out-of-range {} accepted", field),
            };
            assert!(msg.contains(field), "message '{}' misses '{}'", msg, field);
        }
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let mut a = HydraulicDamper::default();
        let mut b = HydraulicDamper::default();
        let out_a = must(a.calculate_damper_performance(&nominal()));
        let out_b = must(b.calculate_damper_performance(&nominal()));
        assert_eq!(out_a, out_b);
    }
}
