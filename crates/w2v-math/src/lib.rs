//! # w2v-math: numeric kernels for word-embedding training.
//!
//! - **Sigmoid lookup table**: `sigmoid(x)` precomputed into fixed buckets over
//!   `[-max_exp, max_exp]`, queried in O(1) with explicit clamping and
//!   truncating index mapping.
//! - **Linear-congruential generator**: the `state * 25214903917 + 11`
//!   recurrence, owned by value instead of living in a global.
//! - **Frequency subsampling**: retention scores and deterministic
//!   keep/discard decisions that down-weight very frequent tokens.
//! - **Sweeps**: sample series of both kernels for external plotting.

pub mod rng;
pub mod shared;
pub mod sigmoid;
pub mod subsampling;
pub mod sweep;

pub use rng::Lcg;
pub use shared::SharedSubsamplingPolicy;
pub use sigmoid::{sigmoid, ExactSigmoid, SigmoidTable};
pub use subsampling::{
    clamp_probability, discard_probability, probability_linear, probability_quadratic,
    relative_frequency, retention_ratio, Decision, Score, SubsamplingMode, SubsamplingPolicy,
};
