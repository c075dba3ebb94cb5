//! Trait interfaces shared between crates.
//!
//! - [`SigmoidApprox`]: evaluation of the logistic function, exact or
//!   approximated (w2v-math implements both).

/// Evaluation of `sigmoid(x) = 1 / (1 + e^-x)`.
///
/// Implementations are pure: the same input always yields the same output,
/// and evaluation never mutates shared state, so they can be shared across
/// threads once built.
pub trait SigmoidApprox: Send + Sync {
    /// Approximate `sigmoid(x)`. Never fails for finite input.
    fn sigmoid(&self, x: f64) -> f64;

    /// Evaluate every input in order.
    fn sigmoid_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.sigmoid(x)).collect()
    }
}
