//! Error types for curve construction.

/// Error type for curve construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Fewer than two breakpoints were supplied.
    #[error("Curve needs at least 2 breakpoints, got {0}")]
    TooFewBreakpoints(usize),

    /// A breakpoint coordinate is NaN or infinite.
    #[error("Breakpoint {index} has a non-finite {coordinate} coordinate")]
    NonFiniteBreakpoint {
        /// Index of the offending breakpoint.
        index: usize,
        /// Which coordinate is non-finite ("x" or "y").
        coordinate: &'static str,
    },

    /// Breakpoint x coordinates are not strictly ascending.
    #[error("Breakpoint {index} x coordinate {value} does not ascend past {previous}")]
    UnorderedBreakpoints {
        /// Index of the offending breakpoint.
        index: usize,
        /// The x coordinate that failed to ascend.
        value: f64,
        /// The previous breakpoint's x coordinate.
        previous: f64,
    },

    /// A factor breakpoint is outside `[0, 1]`.
    #[error("Breakpoint {index} factor {value} is outside [0, 1]")]
    FactorOutOfRange {
        /// Index of the offending breakpoint.
        index: usize,
        /// The invalid factor.
        value: f64,
    },
}
