//! Sigmoid lookup table.
//!
//! Trainers evaluate `sigmoid(x)` in their innermost loop. Instead of calling
//! `exp` each time, the curve is precomputed into `size` buckets spanning
//! `[-max_exp, max_exp]` and each query returns the value of the bucket that
//! contains `x`. There is no interpolation between buckets.
//!
//! Bucket `i` holds `sigmoid(-max_exp + 2 * max_exp * i / size)`, i.e. the value
//! at the bucket's left edge. Inputs at or beyond either end of the domain
//! saturate to the first or last bucket.

use tracing::debug;
use w2v_core::config::SigmoidConfig;
use w2v_core::error::SigmoidError;
use w2v_core::traits::SigmoidApprox;

/// Exact logistic function `1 / (1 + e^-x)`.
///
/// Uses `e^x / (1 + e^x)` for negative inputs so neither branch evaluates
/// `exp` of a large positive argument.
///
/// # Examples
///
/// ```
/// use w2v_math::sigmoid;
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert!(sigmoid(10.0) > 0.9999);
/// assert!(sigmoid(-10.0) < 0.0001);
/// ```
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Reference implementation of [`SigmoidApprox`] that calls [`sigmoid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSigmoid;

impl SigmoidApprox for ExactSigmoid {
    fn sigmoid(&self, x: f64) -> f64 {
        sigmoid(x)
    }
}

/// Precomputed bucket approximation of the sigmoid over `[-max_exp, max_exp]`.
///
/// Immutable after construction and therefore `Send + Sync`.
#[derive(Debug, Clone, PartialEq)]
pub struct SigmoidTable {
    max_exp: f64,
    table: Box<[f64]>,
}

impl SigmoidTable {
    /// Build a table of `size` buckets covering `[-max_exp, max_exp]`.
    ///
    /// Fails if `size == 0`, if `max_exp` is not a positive finite number, or
    /// if `2 * max_exp * size` overflows `f64`.
    ///
    /// Values stay strictly inside `(0, 1)` only while `max_exp` is below
    /// about 36.7. Beyond that the top buckets round to exactly `1.0`, and past
    /// about 709 the bottom buckets underflow to `0.0`. Callers that need an
    /// open interval should keep `max_exp` small (the conventional value is 6).
    ///
    /// # Examples
    ///
    /// ```
    /// use w2v_math::SigmoidTable;
    /// let t = SigmoidTable::new(1000, 6.0).unwrap();
    /// assert_eq!(t.lookup(0.0), 0.5);
    /// assert!(SigmoidTable::new(0, 6.0).is_err());
    /// ```
    pub fn new(size: usize, max_exp: f64) -> Result<Self, SigmoidError> {
        SigmoidConfig { size, max_exp }.validate()?;

        let n = size as f64;
        let table: Box<[f64]> = (0..size)
            .map(|i| {
                let x = (i as f64 / n * 2.0 - 1.0) * max_exp;
                1.0 / (1.0 + (-x).exp())
            })
            .collect();

        debug!(size, max_exp, "built sigmoid table");
        Ok(Self { max_exp, table })
    }

    /// Build a table from a validated-on-construction [`SigmoidConfig`].
    pub fn from_config(config: &SigmoidConfig) -> Result<Self, SigmoidError> {
        Self::new(config.size, config.max_exp)
    }

    /// Number of buckets.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Half-width of the covered domain.
    pub fn max_exp(&self) -> f64 {
        self.max_exp
    }

    /// The precomputed bucket values, in ascending order of `x`.
    pub fn as_slice(&self) -> &[f64] {
        &self.table
    }

    /// Bucket that serves input `x`.
    ///
    /// `x <= -max_exp` maps to `0` and `x >= max_exp` maps to `size - 1`.
    /// Inside the domain the index is `floor((x + max_exp) * size / (2 * max_exp))`,
    /// truncated and then clamped into `[0, size - 1]` because the product can
    /// round up to `size` just below the upper edge. NaN maps to bucket `0`.
    pub fn bucket_index(&self, x: f64) -> usize {
        let last = self.table.len() - 1;
        if x <= -self.max_exp {
            return 0;
        }
        if x >= self.max_exp {
            return last;
        }

        let scaled = ((x + self.max_exp) * self.table.len() as f64 / (2.0 * self.max_exp)).floor();
        // Float-to-int `as` saturates: negatives and NaN become 0.
        (scaled as usize).min(last)
    }

    /// Approximate `sigmoid(x)` by bucket lookup. Pure; never panics.
    pub fn lookup(&self, x: f64) -> f64 {
        self.table[self.bucket_index(x)]
    }

    /// Like [`lookup`](Self::lookup), but returns `None` when `|x| >= max_exp`.
    ///
    /// Hierarchical-softmax updates skip activations outside the table domain
    /// instead of saturating them.
    pub fn lookup_in_domain(&self, x: f64) -> Option<f64> {
        if x.abs() < self.max_exp {
            Some(self.lookup(x))
        } else {
            None
        }
    }

    /// Largest absolute difference between [`lookup`](Self::lookup) and the
    /// exact sigmoid over `samples`. Returns `0.0` for an empty slice.
    pub fn max_abs_error(&self, samples: &[f64]) -> f64 {
        samples
            .iter()
            .map(|&x| (self.lookup(x) - sigmoid(x)).abs())
            .fold(0.0, f64::max)
    }
}

impl SigmoidApprox for SigmoidTable {
    fn sigmoid(&self, x: f64) -> f64 {
        self.lookup(x)
    }
}
