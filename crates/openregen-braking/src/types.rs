//! Input, output, and vehicle parameter types for the braking chain.

use serde::{Deserialize, Serialize};

/// Per-cycle braking inputs, sampled by the host and treated as immutable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrakingInputs {
    /// Vehicle speed, km/h, valid `[0, 200]`.
    pub vehicle_speed_kmh: f64,
    /// Driver braking demand, normalized `[0, 1]`.
    pub braking_intensity: f64,
    /// Battery state of charge, `[0, 1]`.
    pub battery_soc: f64,
    /// Hottest drive-motor winding temperature, C, valid `[-40, 200]`.
    pub motor_temperature_c: f64,
}

/// Result of one braking control cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrakingOutputs {
    /// Fraction of the braking demand satisfied electrically, `[0, 1]`.
    pub regen_ratio: f64,
    /// Commanded torque per motor (N·m, ≥ 0), ordered as
    /// [`VehicleParameters::motor_locations`].
    pub motor_torques_nm: Vec<f64>,
    /// Friction-brake force make-up, N, ≥ 0.
    pub mechanical_brake_force_n: f64,
    /// Electrical power recovered this cycle, W, ≥ 0.
    pub regenerated_power_w: f64,
}

impl BrakingOutputs {
    /// An all-zero output, used when no braking is demanded.
    pub fn zeroed(motor_count: usize) -> Self {
        Self {
            regen_ratio: 0.0,
            motor_torques_nm: vec![0.0; motor_count],
            mechanical_brake_force_n: 0.0,
            regenerated_power_w: 0.0,
        }
    }

    /// Sum of all commanded motor torques, N·m.
    pub fn total_motor_torque_nm(&self) -> f64 {
        self.motor_torques_nm.iter().sum()
    }
}

/// Number of drive motors fitted to the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MotorCount {
    /// Front-axle motors only.
    #[default]
    Two,
    /// One motor per wheel.
    Four,
}

impl MotorCount {
    /// Number of motors.
    pub fn count(self) -> usize {
        match self {
            MotorCount::Two => 2,
            MotorCount::Four => 4,
        }
    }
}

/// Physical location of a drive motor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorLocation {
    /// Front left wheel.
    FrontLeft,
    /// Front right wheel.
    FrontRight,
    /// Rear left wheel.
    RearLeft,
    /// Rear right wheel.
    RearRight,
}

impl MotorLocation {
    /// Whether this motor sits on the front axle.
    pub fn is_front(self) -> bool {
        matches!(self, MotorLocation::FrontLeft | MotorLocation::FrontRight)
    }

    /// Whether this motor sits on the left side.
    pub fn is_left(self) -> bool {
        matches!(self, MotorLocation::FrontLeft | MotorLocation::RearLeft)
    }
}

impl std::fmt::Display for MotorLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotorLocation::FrontLeft => write!(f, "front-left"),
            MotorLocation::FrontRight => write!(f, "front-right"),
            MotorLocation::RearLeft => write!(f, "rear-left"),
            MotorLocation::RearRight => write!(f, "rear-right"),
        }
    }
}

/// Static vehicle and drivetrain parameters (an external collaborator
/// record; the host supplies it at construction).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleParameters {
    /// Curb mass plus nominal load, kg.
    pub mass_kg: f64,
    /// Fraction of weight carried by the front axle, `[0, 1]`.
    pub front_axle_weight_ratio: f64,
    /// Rolling radius of the driven wheels, m.
    pub wheel_radius_m: f64,
    /// Motor configuration.
    pub motor_count: MotorCount,
    /// Hard per-motor torque ceiling, N·m.
    pub max_motor_torque_nm: f64,
    /// Per-motor electrical power ceiling, W.
    pub max_motor_power_w: f64,
    /// Wheel-to-battery conversion efficiency, `(0, 1]`.
    pub drivetrain_efficiency: f64,
    /// Service brake force at full pedal, N.
    pub max_service_brake_force_n: f64,
}

impl Default for VehicleParameters {
    fn default() -> Self {
        Self {
            mass_kg: 1850.0,
            front_axle_weight_ratio: 0.6,
            wheel_radius_m: 0.33,
            motor_count: MotorCount::Two,
            max_motor_torque_nm: 800.0,
            max_motor_power_w: 75_000.0,
            drivetrain_efficiency: 0.92,
            max_service_brake_force_n: 12_000.0,
        }
    }
}

impl VehicleParameters {
    /// Motor locations in command order for this configuration.
    pub fn motor_locations(&self) -> Vec<MotorLocation> {
        match self.motor_count {
            MotorCount::Two => vec![MotorLocation::FrontLeft, MotorLocation::FrontRight],
            MotorCount::Four => vec![
                MotorLocation::FrontLeft,
                MotorLocation::FrontRight,
                MotorLocation::RearLeft,
                MotorLocation::RearRight,
            ],
        }
    }
}
