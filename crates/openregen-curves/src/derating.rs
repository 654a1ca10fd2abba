//! Validated breakpoint curve with linear interpolation.

use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// A derating curve: breakpoints `(x, factor)` with linear interpolation.
///
/// Breakpoints are validated at construction: at least two, all finite,
/// x strictly ascending, factors within `[0, 1]`. Evaluation clamps to the
/// first/last factor outside the breakpoint span, so a curve never
/// extrapolates.
///
/// The same abstraction serves every derating concern in the core; the
/// subsystem-specific breakpoint tables live in [`crate::presets`].
#[derive(Clone, Debug, PartialEq)]
pub struct DeratingCurve {
    pub(crate) points: Vec<(f64, f64)>,
}

impl DeratingCurve {
    /// Build a curve from `(x, factor)` breakpoints.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] if fewer than two breakpoints are supplied,
    /// any coordinate is non-finite, x coordinates are not strictly
    /// ascending, or a factor is outside `[0, 1]`.
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewBreakpoints(points.len()));
        }

        let mut previous_x: Option<f64> = None;
        for (index, &(x, factor)) in points.iter().enumerate() {
            if !x.is_finite() {
                return Err(CurveError::NonFiniteBreakpoint {
                    index,
                    coordinate: "x",
                });
            }
            if !factor.is_finite() {
                return Err(CurveError::NonFiniteBreakpoint {
                    index,
                    coordinate: "factor",
                });
            }
            if !(0.0..=1.0).contains(&factor) {
                return Err(CurveError::FactorOutOfRange {
                    index,
                    value: factor,
                });
            }
            if let Some(prev) = previous_x {
                if x <= prev {
                    return Err(CurveError::UnorderedBreakpoints {
                        index,
                        value: x,
                        previous: prev,
                    });
                }
            }
            previous_x = Some(x);
        }

        Ok(Self { points })
    }

    /// Evaluate the curve at `x` (RT-safe, no allocation).
    ///
    /// Inputs left of the first breakpoint return the first factor; inputs
    /// right of the last return the last factor. Between breakpoints the
    /// factor is linearly interpolated.
    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut iter = self.points.iter();
        let Some(&(first_x, first_factor)) = iter.next() else {
            // Construction guarantees at least two points.
            return 1.0;
        };
        if x <= first_x {
            return first_factor;
        }

        let mut prev = (first_x, first_factor);
        for &(bx, bfactor) in iter {
            if x <= bx {
                let span = bx - prev.0;
                if span <= f64::EPSILON {
                    return bfactor;
                }
                let fraction = (x - prev.0) / span;
                return prev.1 + fraction * (bfactor - prev.1);
            }
            prev = (bx, bfactor);
        }

        prev.1
    }

    /// The breakpoints backing this curve.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Check that factors never increase along the curve.
    ///
    /// Thermal and SOC curves are expected to be non-increasing; the speed
    /// efficiency curve is not (it peaks mid-band).
    pub fn is_non_increasing(&self) -> bool {
        self.points.windows(2).all(|pair| match pair {
            [(_, a), (_, b)] => b <= a,
            _ => true,
        })
    }

    /// The smallest factor on the curve.
    pub fn min_factor(&self) -> f64 {
        self.points
            .iter()
            .map(|&(_, f)| f)
            .fold(f64::INFINITY, f64::min)
    }

    /// The largest factor on the curve.
    pub fn max_factor(&self) -> f64 {
        self.points
            .iter()
            .map(|&(_, f)| f)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Serialize for DeratingCurve {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.points.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DeratingCurve {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points: Vec<(f64, f64)> = Vec::deserialize(deserializer)?;
        DeratingCurve::new(points).map_err(serde::de::Error::custom)
    }
}
