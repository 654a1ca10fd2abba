//! Standard derating breakpoint tables used across the core.
//!
//! Each subsystem keeps its own breakpoints but shares the
//! [`DeratingCurve`] mechanics. Tables here are validated by tests; the
//! constructors below are infallible for callers.

use crate::derating::DeratingCurve;

fn build(points: Vec<(f64, f64)>) -> DeratingCurve {
    match DeratingCurve::new(points) {
        Ok(curve) => curve,
        // The static tables are covered by tests; this arm is unreachable
        // in practice and keeps the constructors infallible.
        Err(_) => DeratingCurve {
            points: vec![(0.0, 1.0), (1.0, 1.0)],
        },
    }
}

/// Motor winding thermal derating (input: motor temperature, C).
///
/// Full torque authority up to 80 C, collapsing toward near-zero above
/// 140 C.
pub fn motor_thermal_derating() -> DeratingCurve {
    build(vec![
        (-40.0, 1.0),
        (80.0, 1.0),
        (100.0, 0.85),
        (120.0, 0.5),
        (140.0, 0.15),
        (160.0, 0.05),
        (200.0, 0.01),
    ])
}

/// Damper coil thermal protection (input: damper temperature, C).
///
/// Generated power is sharply curtailed above ~100 C.
pub fn damper_thermal_protection() -> DeratingCurve {
    build(vec![
        (-40.0, 1.0),
        (90.0, 1.0),
        (100.0, 0.95),
        (110.0, 0.4),
        (130.0, 0.12),
        (150.0, 0.04),
        (200.0, 0.01),
    ])
}

/// Battery charge acceptance (input: state of charge, `[0,1]`).
///
/// Regeneration backs off monotonically toward zero as the pack fills.
pub fn soc_charge_acceptance() -> DeratingCurve {
    build(vec![
        (0.0, 1.0),
        (0.3, 0.98),
        (0.6, 0.9),
        (0.8, 0.6),
        (0.9, 0.3),
        (0.97, 0.08),
        (1.0, 0.01),
    ])
}

/// Recuperation efficiency over vehicle speed (input: m/s).
///
/// Peaks near 15 m/s; falls off toward standstill (little back-EMF) and at
/// very high speed (field-weakening losses).
pub fn speed_recovery_efficiency() -> DeratingCurve {
    build(vec![
        (0.0, 0.3),
        (5.0, 0.62),
        (10.0, 0.85),
        (15.0, 0.92),
        (25.0, 0.8),
        (40.0, 0.62),
        (60.0, 0.45),
        (85.0, 0.3),
    ])
}

/// Conversion-efficiency factor over component temperature (input: C).
///
/// Extreme cold thickens the working fluid and drops efficiency well below
/// the normal-temperature value; overheating degrades it again.
pub fn cold_efficiency() -> DeratingCurve {
    build(vec![
        (-40.0, 0.45),
        (-20.0, 0.6),
        (-10.0, 0.72),
        (0.0, 0.85),
        (10.0, 0.95),
        (25.0, 1.0),
        (60.0, 0.97),
        (100.0, 0.85),
        (150.0, 0.55),
        (200.0, 0.3),
    ])
}
