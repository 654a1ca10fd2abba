//! Input, output, configuration, and diagnostics types for the integrated
//! system.

use serde::{Deserialize, Serialize};

use openregen_braking::{BrakingInputs, BrakingOutputs};
use openregen_damper::{DamperInputs, DamperOutputs};
use openregen_suspension::{SuspensionInputs, SuspensionOutputs};

/// Number of suspension corners managed by the system.
pub const CORNER_COUNT: usize = 4;

/// Per-cycle snapshot for one suspension corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerInputs {
    /// Suspension controller snapshot for this corner.
    pub suspension: SuspensionInputs,
    /// Damper model snapshot for this corner.
    pub damper: DamperInputs,
}

impl Default for CornerInputs {
    fn default() -> Self {
        Self {
            suspension: SuspensionInputs::default(),
            damper: DamperInputs {
                compression_velocity_mps: 0.0,
                displacement_m: 0.0,
                vehicle_speed_kmh: 0.0,
                road_roughness: 0.0,
                damper_temperature_c: 25.0,
                battery_soc: 0.5,
                load_factor: 0.5,
            },
        }
    }
}

/// Full per-cycle snapshot for the integrated system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegratedInputs {
    /// Braking chain snapshot.
    pub braking: BrakingInputs,
    /// Four corner snapshots, front-left, front-right, rear-left,
    /// rear-right.
    pub corners: [CornerInputs; CORNER_COUNT],
}

impl Default for IntegratedInputs {
    /// A stationary vehicle with no braking demand and quiet suspension.
    fn default() -> Self {
        Self {
            braking: BrakingInputs {
                vehicle_speed_kmh: 0.0,
                braking_intensity: 0.0,
                battery_soc: 0.5,
                motor_temperature_c: 25.0,
            },
            corners: [CornerInputs::default(); CORNER_COUNT],
        }
    }
}

/// Per-corner result after arbitration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerOutputs {
    /// Suspension controller command.
    pub suspension: SuspensionOutputs,
    /// Damper model evaluation, with `generated_power_w` already scaled by
    /// the arbitration factors.
    pub damper: DamperOutputs,
}

/// Power accounting for one cycle.
///
/// `total_generated_power_w` is always computed as the sum of the two
/// source fields, never independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    /// Power recovered through regenerative braking, W.
    pub regenerative_braking_power_w: f64,
    /// Power harvested by the four dampers combined, W.
    pub damper_power_w: f64,
    /// Sum of the two sources after arbitration, W.
    pub total_generated_power_w: f64,
    /// Power drawn by the damper valve actuators, W.
    pub total_consumed_power_w: f64,
}

/// Qualitative condition of the last cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemHealth {
    #[default]
    Excellent,
    /// Some derating (thermal or battery) was active.
    Good,
    /// The combined-power cap or a severe curtailment engaged.
    Degraded,
}

/// Result of one integrated control cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegratedOutputs {
    /// Braking chain result, power already scaled by the arbitration
    /// factors.
    pub braking: BrakingOutputs,
    /// Four corner results in input order.
    pub corners: [CornerOutputs; CORNER_COUNT],
    /// Cycle power accounting.
    pub energy_balance: EnergyBalance,
    /// Condition grading for this cycle.
    pub system_health: SystemHealth,
}

/// Arbitration policy and limits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemConfiguration {
    /// When the combined cap engages, preserve braking power first
    /// (`true`) or damper power first (`false`).
    pub prioritize_braking: bool,
    /// Combined generated-power ceiling, W.
    pub max_combined_power_w: f64,
    /// Battery SOC at which recovery is fully backed off, `[0, 1]`.
    pub battery_charging_threshold: f64,
    /// Whether the system-level thermal derating is applied.
    pub thermal_management_enabled: bool,
}

impl Default for SystemConfiguration {
    fn default() -> Self {
        Self {
            prioritize_braking: true,
            max_combined_power_w: 150_000.0,
            battery_charging_threshold: 0.95,
            thermal_management_enabled: true,
        }
    }
}

/// Partial update for [`SystemConfiguration`].
///
/// `None` fields retain their previous values. Out-of-range values are
/// clamped to the nearest valid value rather than rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemConfigurationUpdate {
    pub prioritize_braking: Option<bool>,
    pub max_combined_power_w: Option<f64>,
    pub battery_charging_threshold: Option<f64>,
    pub thermal_management_enabled: Option<bool>,
}

impl SystemConfigurationUpdate {
    /// Merge onto `current`.
    pub fn apply(&self, current: &mut SystemConfiguration) {
        if let Some(v) = self.prioritize_braking {
            current.prioritize_braking = v;
        }
        if let Some(v) = self.max_combined_power_w {
            current.max_combined_power_w = v.max(0.0);
        }
        if let Some(v) = self.battery_charging_threshold {
            current.battery_charging_threshold = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.thermal_management_enabled {
            current.thermal_management_enabled = v;
        }
    }
}

/// Cumulative system diagnostics, monotone until reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemDiagnostics {
    /// Total energy recovered since the last reset, J.
    pub total_energy_j: f64,
    /// Operating time accumulated since the last reset, s.
    pub operating_time_s: f64,
    /// Control cycles executed since the last reset.
    pub cycles: u64,
    /// Cycles in which the combined-power cap engaged, since the last
    /// reset.
    pub curtailment_events: u64,
    /// Grading of the most recent cycle.
    pub system_health: SystemHealth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = SystemConfiguration::default();
        assert!(config.prioritize_braking);
        assert!(config.thermal_management_enabled);
        assert_eq!(config.battery_charging_threshold, 0.95);
    }

    #[test]
    fn test_update_merges_only_set_fields() {
        let mut config = SystemConfiguration::default();
        let update = SystemConfigurationUpdate {
            max_combined_power_w: Some(3000.0),
            ..SystemConfigurationUpdate::default()
        };
        update.apply(&mut config);
        assert_eq!(config.max_combined_power_w, 3000.0);
        assert!(config.prioritize_braking);
        assert_eq!(config.battery_charging_threshold, 0.95);
    }

    #[test]
    fn test_update_clamps_out_of_range_values() {
        let mut config = SystemConfiguration::default();
        let update = SystemConfigurationUpdate {
            max_combined_power_w: Some(-100.0),
            battery_charging_threshold: Some(1.5),
            ..SystemConfigurationUpdate::default()
        };
        update.apply(&mut config);
        assert_eq!(config.max_combined_power_w, 0.0);
        assert_eq!(config.battery_charging_threshold, 1.0);
    }

    #[test]
    fn test_configuration_serde_round_trip() {
        let config = SystemConfiguration {
            prioritize_braking: false,
            ..SystemConfiguration::default()
        };
        let json = match serde_json::to_string(&config) {
            Ok(j) => j,
            Err(e) => panic!("serialization failed: {}", e),
        };
        let back: SystemConfiguration = match serde_json::from_str(&json) {
            Ok(v) => v,
            Err(e) => panic!("deserialization failed: {}", e),
        };
        assert_eq!(config, back);
    }
}
