//! Sample series for plotting.
//!
//! Produces the input grids and the evaluated points that an external plotting
//! tool renders as line charts. Nothing here makes decisions; it only calls
//! into [`crate::sigmoid`] and [`crate::subsampling`].

use serde::Serialize;
use w2v_core::constants::{
    FREQUENCY_SWEEP_POINTS, FREQUENCY_SWEEP_STEP, SIGMOID_SWEEP_DIVISOR,
    SIGMOID_SWEEP_HALF_POINTS,
};
use w2v_core::error::SubsamplingError;
use w2v_core::traits::SigmoidApprox;

use crate::rng::Lcg;
use crate::sigmoid::ExactSigmoid;
use crate::subsampling::{check_frequency, Score, SubsamplingMode, SubsamplingPolicy};

/// `x = f / 10` for `f ∈ [-60, 60)`.
pub fn sigmoid_grid() -> Vec<f64> {
    (-SIGMOID_SWEEP_HALF_POINTS..SIGMOID_SWEEP_HALF_POINTS)
        .map(|f| f as f64 / SIGMOID_SWEEP_DIVISOR)
        .collect()
}

/// `freq = 0.001 * i` for `i ∈ [1, 100)`.
pub fn frequency_grid() -> Vec<f64> {
    (1..=FREQUENCY_SWEEP_POINTS)
        .map(|i| FREQUENCY_SWEEP_STEP * i as f64)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SigmoidPoint {
    pub x: f64,
    pub approx: f64,
    pub exact: f64,
}

impl SigmoidPoint {
    pub fn abs_error(&self) -> f64 {
        (self.approx - self.exact).abs()
    }
}

/// Evaluate `approx` and the exact sigmoid at each of `xs`.
pub fn sigmoid_sweep<A: SigmoidApprox + ?Sized>(approx: &A, xs: &[f64]) -> Vec<SigmoidPoint> {
    xs.iter()
        .map(|&x| SigmoidPoint {
            x,
            approx: approx.sigmoid(x),
            exact: ExactSigmoid.sigmoid(x),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubsamplingPoint {
    pub freq: f64,
    pub sampling_rate: f64,
    pub mode: SubsamplingMode,
    pub score: Score,
}

/// Score every frequency under every sampling rate, rate-major.
///
/// Each rate gets its own policy seeded with `seed`, so the curve for one rate
/// does not depend on how many rates precede it. All inputs are validated
/// before anything is evaluated.
pub fn subsampling_sweep(
    freqs: &[f64],
    sampling_rates: &[f64],
    mode: SubsamplingMode,
    seed: u64,
) -> Result<Vec<SubsamplingPoint>, SubsamplingError> {
    let mut policies = sampling_rates
        .iter()
        .map(|&rate| SubsamplingPolicy::with_rng(rate, Lcg::new(seed)))
        .collect::<Result<Vec<_>, _>>()?;
    freqs.iter().try_for_each(|&f| check_frequency(f))?;

    let mut points = Vec::with_capacity(freqs.len() * policies.len());
    for policy in &mut policies {
        for &freq in freqs {
            points.push(SubsamplingPoint {
                freq,
                sampling_rate: policy.sampling_rate(),
                mode,
                score: policy.score(freq, mode)?,
            });
        }
    }
    Ok(points)
}
