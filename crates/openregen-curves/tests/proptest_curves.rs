//! Proptest coverage for curve construction and interpolation.
//!
//! Generates arbitrary breakpoint tables and verifies that construction
//! only accepts well-formed ones and that evaluation of accepted tables
//! stays inside the breakpoint hull.

use openregen_curves::DeratingCurve;
use proptest::prelude::*;

fn breakpoints() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-200.0..200.0f64, 0.0..=1.0f64), 2..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Construction only succeeds when x values are strictly ascending.
    #[test]
    fn prop_construction_requires_ascending_x(points in breakpoints()) {
        let ascending = points.windows(2).all(|w| w[0].0 < w[1].0);
        let result = DeratingCurve::new(points);
        prop_assert_eq!(result.is_ok(), ascending);
    }

    /// Evaluation never leaves the [min_factor, max_factor] hull.
    #[test]
    fn prop_evaluation_stays_in_hull(mut points in breakpoints(), x in -500.0..500.0f64) {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|a, b| a.0.total_cmp(&b.0).is_eq());
        prop_assume!(points.len() >= 2);
        let curve = match DeratingCurve::new(points) {
            Ok(c) => c,
            Err(e) => return Err(TestCaseError::fail(format!("valid table rejected: {e}"))),
        };
        let factor = curve.evaluate(x);
        prop_assert!(factor >= curve.min_factor() - 1e-12);
        prop_assert!(factor <= curve.max_factor() + 1e-12);
    }

    /// Outside the breakpoint span, evaluation clamps to the end factors.
    #[test]
    fn prop_ends_clamp(mut points in breakpoints(), offset in 1.0..1000.0f64) {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|a, b| a.0.total_cmp(&b.0).is_eq());
        prop_assume!(points.len() >= 2);
        let first = points[0];
        let last = points[points.len() - 1];
        let curve = match DeratingCurve::new(points) {
            Ok(c) => c,
            Err(e) => return Err(TestCaseError::fail(format!("valid table rejected: {e}"))),
        };
        prop_assert_eq!(curve.evaluate(first.0 - offset), first.1);
        prop_assert_eq!(curve.evaluate(last.0 + offset), last.1);
    }

    /// Evaluating exactly at a breakpoint returns that breakpoint's factor.
    #[test]
    fn prop_breakpoints_are_fixed_points(mut points in breakpoints(), index in 0usize..8) {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points.dedup_by(|a, b| a.0.total_cmp(&b.0).is_eq());
        prop_assume!(points.len() >= 2);
        let (x, factor) = points[index % points.len()];
        let curve = match DeratingCurve::new(points) {
            Ok(c) => c,
            Err(e) => return Err(TestCaseError::fail(format!("valid table rejected: {e}"))),
        };
        prop_assert!((curve.evaluate(x) - factor).abs() < 1e-12);
    }
}
