//! Triangular and trapezoidal membership functions.

use serde::{Deserialize, Serialize};

/// Error type for membership function construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FuzzyError {
    /// A defining point is NaN or infinite.
    #[error("Membership point '{0}' is not finite")]
    NonFinitePoint(&'static str),

    /// Defining points are not in non-decreasing order.
    #[error("Membership points must be non-decreasing: {0} > {1}")]
    UnorderedPoints(f64, f64),
}

/// A membership function over one crisp input variable.
///
/// Shoulder sets are expressed with coincident points: a trapezoid
/// `(0, 0, 0.2, 0.4)` has full membership from the left edge, and
/// `(0.6, 0.8, 1.0, 1.0)` from the right.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Triangle with feet `a`/`c` and peak `b`.
    Triangular {
        /// Left foot.
        a: f64,
        /// Peak.
        b: f64,
        /// Right foot.
        c: f64,
    },
    /// Trapezoid with feet `a`/`d` and plateau `[b, c]`.
    Trapezoidal {
        /// Left foot.
        a: f64,
        /// Plateau start.
        b: f64,
        /// Plateau end.
        c: f64,
        /// Right foot.
        d: f64,
    },
}

fn check_order(points: &[(&'static str, f64)]) -> Result<(), FuzzyError> {
    let mut prev: Option<f64> = None;
    for &(name, value) in points {
        if !value.is_finite() {
            return Err(FuzzyError::NonFinitePoint(name));
        }
        if let Some(p) = prev {
            if value < p {
                return Err(FuzzyError::UnorderedPoints(p, value));
            }
        }
        prev = Some(value);
    }
    Ok(())
}

impl MembershipFunction {
    /// Create a triangular membership function.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError`] when points are non-finite or out of order.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, FuzzyError> {
        check_order(&[("a", a), ("b", b), ("c", c)])?;
        Ok(Self::Triangular { a, b, c })
    }

    /// Create a trapezoidal membership function.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError`] when points are non-finite or out of order.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, FuzzyError> {
        check_order(&[("a", a), ("b", b), ("c", c), ("d", d)])?;
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Membership degree of `x`, always in `[0, 1]` (RT-safe).
    #[inline]
    pub fn degree(&self, x: f64) -> f64 {
        let (a, b, c, d) = match *self {
            Self::Triangular { a, b, c } => (a, b, b, c),
            Self::Trapezoidal { a, b, c, d } => (a, b, c, d),
        };

        if !x.is_finite() || x < a {
            return 0.0;
        }
        if x < b {
            // b > a is implied by x ordering: a <= x < b
            return ((x - a) / (b - a)).clamp(0.0, 1.0);
        }
        if x <= c {
            return 1.0;
        }
        if x < d {
            return ((d - x) / (d - c)).clamp(0.0, 1.0);
        }
        0.0
    }
}
