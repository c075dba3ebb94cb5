//! Numeric constants used by word-embedding trainers.

/// Default number of buckets in the sigmoid lookup table.
pub const EXP_TABLE_SIZE: usize = 1000;

/// Default half-width of the sigmoid table domain.
///
/// The table covers `x ∈ [-MAX_EXP, MAX_EXP]`; activations outside that range
/// saturate to the first or last bucket.
pub const MAX_EXP: f64 = 6.0;

/// Default subsampling threshold.
pub const DEFAULT_SAMPLING_RATE: f64 = 1e-3;

/// Multiplier of the linear-congruential generator.
pub const LCG_MULTIPLIER: u64 = 25_214_903_917;

/// Increment of the linear-congruential generator.
pub const LCG_INCREMENT: u64 = 11;

/// Initial generator state.
pub const LCG_SEED: u64 = 1;

/// Mask selecting the low 16 bits of the generator state.
pub const LCG_LOW_MASK: u64 = 0xFFFF;

/// Divisor mapping a 16-bit sample onto `[0, 1]` for subsampling decisions.
///
/// `65535` makes the largest sample map to exactly `1.0`.
pub const DECISION_DIVISOR: f64 = 65_535.0;

/// Divisor mapping a 16-bit sample onto `[0, 1)` for uniform draws.
pub const UNIT_DIVISOR: f64 = 65_536.0;

/// Divisor of the standard sigmoid sample grid (`x = f / 10`).
pub const SIGMOID_SWEEP_DIVISOR: f64 = 10.0;

/// The standard sigmoid sample grid uses `f ∈ [-60, 60)`, i.e. `x ∈ [-6, 6)`.
pub const SIGMOID_SWEEP_HALF_POINTS: i32 = 60;

/// Step of the standard frequency sample grid (`freq = 0.001 * i`).
pub const FREQUENCY_SWEEP_STEP: f64 = 0.001;

/// Number of points in the standard frequency sample grid (`i ∈ [1, 100)`).
pub const FREQUENCY_SWEEP_POINTS: usize = 99;

/// Sampling rates compared by the standard subsampling sweep.
pub const SWEEP_SAMPLING_RATES: [f64; 4] = [1e-3, 1e-4, 1e-5, 1e-6];
