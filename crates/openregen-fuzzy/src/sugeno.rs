//! Zero-order Sugeno rule aggregation.

/// Accumulates rule activations against output singletons and defuzzifies
/// by activation-weighted average.
///
/// The blender is a plain accumulator so controllers can feed it from any
/// rule-base shape (a flat list, a two-variable product table, a weighted
/// adaptive rule set) without this crate dictating the structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct SugenoBlender {
    weighted_sum: f64,
    activation_sum: f64,
}

impl SugenoBlender {
    /// Create an empty blender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rule firing: `activation` in `[0, 1]` against an output
    /// singleton. Non-finite or negative activations contribute nothing.
    #[inline]
    pub fn add(&mut self, activation: f64, output: f64) {
        if !activation.is_finite() || !output.is_finite() {
            return;
        }
        let activation = activation.clamp(0.0, 1.0);
        self.weighted_sum += activation * output;
        self.activation_sum += activation;
    }

    /// Total accumulated activation mass.
    pub fn activation_sum(&self) -> f64 {
        self.activation_sum
    }

    /// Defuzzify. Returns `default` when no rule fired meaningfully.
    #[inline]
    pub fn crisp(&self, default: f64) -> f64 {
        if self.activation_sum < 1e-9 {
            default
        } else {
            self.weighted_sum / self.activation_sum
        }
    }
}
