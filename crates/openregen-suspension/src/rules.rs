//! Compile-time enumeration of the adaptive rule base.
//!
//! Rule weights live in a fixed-size array indexed by [`RuleId`], so the
//! learned state has a bounded, allocation-free representation and lookups
//! cannot miss.

use serde::{Deserialize, Serialize};

/// Identity of one rule in the suspension controller's rule base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    /// Gentle wheel motion on a smooth surface: soft damping.
    LowVelocitySmoothRoad,
    /// Gentle motion on a rough surface: moderate damping.
    LowVelocityRoughRoad,
    /// Fast wheel motion on a smooth surface: firm damping.
    HighVelocitySmoothRoad,
    /// Fast motion on a rough surface: near-maximum damping.
    HighVelocityRoughRoad,
    /// Energy storage running low: bias toward harvesting.
    EnergyStorageLow,
    /// Fluid overheating: soften to reduce self-heating.
    ThermalHot,
    /// Sport mode: stiffen for body control.
    SportModeStiffen,
    /// Eco/comfort mode: soften for isolation.
    ComfortModeSoften,
}

impl RuleId {
    /// Number of rules in the base.
    pub const COUNT: usize = 8;

    /// Array index of this rule.
    pub fn index(self) -> usize {
        match self {
            RuleId::LowVelocitySmoothRoad => 0,
            RuleId::LowVelocityRoughRoad => 1,
            RuleId::HighVelocitySmoothRoad => 2,
            RuleId::HighVelocityRoughRoad => 3,
            RuleId::EnergyStorageLow => 4,
            RuleId::ThermalHot => 5,
            RuleId::SportModeStiffen => 6,
            RuleId::ComfortModeSoften => 7,
        }
    }

    /// All rules in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            RuleId::LowVelocitySmoothRoad,
            RuleId::LowVelocityRoughRoad,
            RuleId::HighVelocitySmoothRoad,
            RuleId::HighVelocityRoughRoad,
            RuleId::EnergyStorageLow,
            RuleId::ThermalHot,
            RuleId::SportModeStiffen,
            RuleId::ComfortModeSoften,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuleId::LowVelocitySmoothRoad => "low-velocity/smooth-road",
            RuleId::LowVelocityRoughRoad => "low-velocity/rough-road",
            RuleId::HighVelocitySmoothRoad => "high-velocity/smooth-road",
            RuleId::HighVelocityRoughRoad => "high-velocity/rough-road",
            RuleId::EnergyStorageLow => "energy-storage-low",
            RuleId::ThermalHot => "thermal-hot",
            RuleId::SportModeStiffen => "sport-mode-stiffen",
            RuleId::ComfortModeSoften => "comfort-mode-soften",
        };
        write!(f, "{}", name)
    }
}
