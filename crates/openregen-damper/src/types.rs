//! Input, output, configuration, and diagnostics types for the damper.

use serde::{Deserialize, Serialize};

/// Per-cycle damper inputs for one suspension corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamperInputs {
    /// Suspension compression velocity, m/s, valid `[-2, 2]`.
    /// Positive is compression, negative is extension; generated power is
    /// symmetric in the sign.
    pub compression_velocity_mps: f64,
    /// Suspension displacement from ride height, m, valid `[-0.15, 0.15]`.
    pub displacement_m: f64,
    /// Vehicle speed, km/h, valid `[0, 300]`.
    pub vehicle_speed_kmh: f64,
    /// Road roughness index, `[0, 1]`.
    pub road_roughness: f64,
    /// Damper coil/fluid temperature, C, valid `[-40, 200]`.
    pub damper_temperature_c: f64,
    /// Battery state of charge, `[0, 1]`.
    pub battery_soc: f64,
    /// Corner load factor, `[0, 1]` (0 = unladen, 1 = maximum load).
    pub load_factor: f64,
}

/// Result of one damper model evaluation. The all-zero default is the
/// "damper at rest" state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamperOutputs {
    /// Electrical power harvested, W, `[0, max_power_w]`.
    pub generated_power_w: f64,
    /// Total damping force, N, `[0, max_damping_force_n]`.
    pub damping_force_n: f64,
    /// Electromagnetic contribution to the damping force, N,
    /// `[0, max_em_force_n]`.
    pub electromagnetic_force_n: f64,
    /// Working-chamber hydraulic pressure, Pa.
    pub hydraulic_pressure_pa: f64,
    /// Energy harvested this cycle, J.
    pub harvested_energy_j: f64,
    /// Electrical conversion efficiency, `[0, 1]`.
    pub energy_efficiency: f64,
    /// Damper temperature after this cycle's self-heating, C.
    pub system_temperature_c: f64,
}

/// Static damper characteristics, merged over [`DamperConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamperConfig {
    /// Electromagnetic force constant, N·s/m.
    pub em_force_constant: f64,
    /// Base hydraulic damping coefficient, N·s/m.
    pub base_damping_coefficient: f64,
    /// Peak electrical conversion efficiency at normal temperature.
    pub conversion_efficiency: f64,
    /// Effective piston area, m².
    pub piston_area_m2: f64,
    /// Control cycle period, s (for per-cycle energy accounting).
    pub cycle_period_s: f64,
    /// Generated power ceiling, W.
    pub max_power_w: f64,
    /// Damping force ceiling, N.
    pub max_damping_force_n: f64,
    /// Electromagnetic force ceiling, N.
    pub max_em_force_n: f64,
    /// Heat dissipation at standstill, W per degree of rise.
    pub base_dissipation_w_per_c: f64,
    /// Additional dissipation per km/h of vehicle speed (airflow).
    pub speed_dissipation_w_per_c_kmh: f64,
}

impl Default for DamperConfig {
    fn default() -> Self {
        Self {
            em_force_constant: 850.0,
            base_damping_coefficient: 3200.0,
            conversion_efficiency: 0.88,
            piston_area_m2: 0.0012,
            cycle_period_s: 0.01,
            max_power_w: 1500.0,
            max_damping_force_n: 8000.0,
            max_em_force_n: 2000.0,
            base_dissipation_w_per_c: 60.0,
            speed_dissipation_w_per_c_kmh: 0.6,
        }
    }
}

/// Cumulative damper diagnostics, reset on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamperDiagnostics {
    /// Total electrical energy harvested since the last reset, J.
    pub total_energy_harvested_j: f64,
    /// Number of model evaluations since the last reset.
    pub operation_cycles: u64,
}
