//! Shared test helpers for integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use w2v_core::constants::{EXP_TABLE_SIZE, MAX_EXP};
use w2v_math::SigmoidTable;

/// The 1000-bucket, `[-6, 6]` table trainers use by default.
pub fn default_table() -> SigmoidTable {
    SigmoidTable::new(EXP_TABLE_SIZE, MAX_EXP).expect("default table parameters are valid")
}

/// `n` random relative frequencies that sum to 1, none of them zero.
///
/// Deterministic for a given `seed`.
pub fn normalized_frequencies(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let raw: Vec<f64> = (0..n).map(|_| rng.gen_range(1e-6..1.0)).collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|r| r / sum).collect()
}

/// Turn token counts into relative frequencies.
pub fn frequencies_from_counts(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    counts
        .iter()
        .map(|&c| w2v_math::relative_frequency(c, total).expect("count within total"))
        .collect()
}
