//! Thread-safe wrapper around [`SubsamplingPolicy`].
//!
//! One decision sequence, many callers: every decision takes the lock, so the
//! generator advances once per call in the order the lock is acquired. Callers
//! that need a reproducible sequence per thread should give each thread its own
//! [`SubsamplingPolicy`] instead.

use std::sync::Arc;

use parking_lot::Mutex;
use w2v_core::error::SubsamplingError;

use crate::subsampling::{Decision, Score, SubsamplingMode, SubsamplingPolicy};

/// Cloneable handle to a policy behind a mutex. Clones share one generator.
#[derive(Debug, Clone)]
pub struct SharedSubsamplingPolicy {
    inner: Arc<Mutex<SubsamplingPolicy>>,
}

impl SharedSubsamplingPolicy {
    pub fn new(policy: SubsamplingPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(policy)),
        }
    }

    pub fn decide(&self, freq: f64) -> Result<Decision, SubsamplingError> {
        self.inner.lock().decide(freq)
    }

    /// Decide a whole batch under one lock, so no other caller interleaves.
    pub fn decide_all(&self, freqs: &[f64]) -> Result<Vec<Decision>, SubsamplingError> {
        self.inner.lock().decide_all(freqs)
    }

    pub fn score(&self, freq: f64, mode: SubsamplingMode) -> Result<Score, SubsamplingError> {
        self.inner.lock().score(freq, mode)
    }

    pub fn state(&self) -> u64 {
        self.inner.lock().state()
    }

    pub fn reseed(&self, seed: u64) {
        self.inner.lock().reseed(seed);
    }

    /// Copy of the wrapped policy, including its current generator state.
    pub fn snapshot(&self) -> SubsamplingPolicy {
        self.inner.lock().clone()
    }
}

impl From<SubsamplingPolicy> for SharedSubsamplingPolicy {
    fn from(policy: SubsamplingPolicy) -> Self {
        Self::new(policy)
    }
}
