//! Resolution of the effective [`NumericsConfig`] for one invocation.
//!
//! Precedence, lowest first: built-in defaults, `--config` JSON file,
//! individual command-line flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use w2v_core::config::NumericsConfig;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON configuration file; flags below override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of sigmoid table buckets
    #[arg(long, global = true)]
    pub size: Option<usize>,

    /// Half-width of the sigmoid table domain
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub max_exp: Option<f64>,

    /// Subsampling threshold
    #[arg(long, global = true)]
    pub sampling_rate: Option<f64>,

    /// Initial state of the pseudo-random generator
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl ConfigArgs {
    /// Merge file and flags into a validated configuration.
    pub fn resolve(&self) -> Result<NumericsConfig> {
        let mut cfg = match &self.config {
            Some(path) => NumericsConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => NumericsConfig::default(),
        };

        if let Some(size) = self.size {
            cfg.sigmoid.size = size;
        }
        if let Some(max_exp) = self.max_exp {
            cfg.sigmoid.max_exp = max_exp;
        }
        if let Some(rate) = self.sampling_rate {
            cfg.subsampling.sampling_rate = rate;
        }
        if let Some(seed) = self.seed {
            cfg.subsampling.seed = seed;
        }

        cfg.validate().context("invalid configuration")?;
        Ok(cfg)
    }
}
