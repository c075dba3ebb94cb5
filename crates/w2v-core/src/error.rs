//! Error types for w2v-numerics.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SigmoidError {
    #[error("table size must be positive")] ZeroSize,
    #[error("max_exp must be positive and finite, got {0}")] InvalidMaxExp(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubsamplingError {
    #[error("frequency must be positive and finite, got {0}")] InvalidFrequency(f64),
    #[error("sampling rate must be positive and finite, got {0}")] InvalidSamplingRate(f64),
    #[error("total count must be positive")] ZeroTotal,
    #[error("count {count} exceeds total {total}")] CountExceedsTotal { count: u64, total: u64 },
    #[error("modulus must be positive")] ZeroModulus,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("parse: {0}")] Parse(String),
    #[error("io: {0}")] Io(String),
}

/// Broad classification of a [`W2vError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied value violated a precondition. Nothing was mutated.
    InvalidArgument,
    /// A configuration source could not be read or parsed.
    Config,
}

#[derive(Error, Debug)]
pub enum W2vError {
    #[error(transparent)] Sigmoid(#[from] SigmoidError),
    #[error(transparent)] Subsampling(#[from] SubsamplingError),
    #[error(transparent)] Config(#[from] ConfigError),
}

impl W2vError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Sigmoid(_) | Self::Subsampling(_) => ErrorKind::InvalidArgument,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_are_invalid_argument() {
        let e: W2vError = SigmoidError::ZeroSize.into();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        let e: W2vError = SubsamplingError::InvalidFrequency(0.0).into();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn config_errors_are_config() {
        let e: W2vError = ConfigError::Parse("eof".into()).into();
        assert_eq!(e.kind(), ErrorKind::Config);
    }

    #[test]
    fn messages_are_transparent() {
        let e: W2vError = SigmoidError::InvalidMaxExp(-1.0).into();
        assert_eq!(e.to_string(), "max_exp must be positive and finite, got -1");
        let e: W2vError = SubsamplingError::CountExceedsTotal { count: 5, total: 3 }.into();
        assert_eq!(e.to_string(), "count 5 exceeds total 3");
    }
}
