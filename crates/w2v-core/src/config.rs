//! Configuration for sigmoid tables and subsampling policies.
//!
//! Provides [`NumericsConfig`] with defaults taken from [`crate::constants`].
//! A configuration can be built programmatically or loaded from a JSON file;
//! command-line front ends then override individual fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SAMPLING_RATE, EXP_TABLE_SIZE, LCG_SEED, MAX_EXP};
use crate::error::{ConfigError, SigmoidError, SubsamplingError, W2vError};

/// Shape of a sigmoid lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigmoidConfig {
    /// Number of buckets.
    pub size: usize,
    /// Half-width of the covered domain.
    pub max_exp: f64,
}

impl Default for SigmoidConfig {
    fn default() -> Self {
        Self {
            size: EXP_TABLE_SIZE,
            max_exp: MAX_EXP,
        }
    }
}

impl SigmoidConfig {
    pub fn validate(&self) -> Result<(), SigmoidError> {
        if self.size == 0 {
            return Err(SigmoidError::ZeroSize);
        }
        if !(self.max_exp > 0.0 && self.max_exp.is_finite()) {
            return Err(SigmoidError::InvalidMaxExp(self.max_exp));
        }
        // Bucket indexing scales by `size / (2 * max_exp)`; both sides must stay finite.
        if !(2.0 * self.max_exp * self.size as f64).is_finite() {
            return Err(SigmoidError::InvalidMaxExp(self.max_exp));
        }
        Ok(())
    }
}

/// Threshold and generator seed of a subsampling policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsamplingConfig {
    /// Subsampling threshold; tokens more frequent than this are down-weighted.
    pub sampling_rate: f64,
    /// Initial state of the linear-congruential generator.
    pub seed: u64,
}

impl Default for SubsamplingConfig {
    fn default() -> Self {
        Self {
            sampling_rate: DEFAULT_SAMPLING_RATE,
            seed: LCG_SEED,
        }
    }
}

impl SubsamplingConfig {
    pub fn validate(&self) -> Result<(), SubsamplingError> {
        if !(self.sampling_rate > 0.0 && self.sampling_rate.is_finite()) {
            return Err(SubsamplingError::InvalidSamplingRate(self.sampling_rate));
        }
        Ok(())
    }
}

/// Complete configuration for both numeric components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericsConfig {
    pub sigmoid: SigmoidConfig,
    pub subsampling: SubsamplingConfig,
}

impl NumericsConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    /// Check every field against the constructors' preconditions.
    pub fn validate(&self) -> Result<(), W2vError> {
        self.sigmoid.validate()?;
        self.subsampling.validate()?;
        Ok(())
    }
}
