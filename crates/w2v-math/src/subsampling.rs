//! Frequency subsampling.
//!
//! Very frequent tokens ("the", "of") carry little information per occurrence,
//! so trainers randomly drop some of their occurrences. Everything here is a
//! function of the token's relative frequency `f` and the sampling threshold
//! `s`. The central quantity is the retention ratio
//!
//! ```text
//! ratio = sqrt(s / f) + s / f
//! ```
//!
//! which exceeds 1 for tokens at or below the threshold (always kept) and
//! approaches 0 as `f` grows (almost always dropped).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use w2v_core::config::SubsamplingConfig;
use w2v_core::constants::DECISION_DIVISOR;
use w2v_core::error::SubsamplingError;

use crate::rng::Lcg;

pub(crate) fn check_frequency(freq: f64) -> Result<(), SubsamplingError> {
    if freq > 0.0 && freq.is_finite() {
        Ok(())
    } else {
        Err(SubsamplingError::InvalidFrequency(freq))
    }
}

fn check_sampling_rate(sampling_rate: f64) -> Result<(), SubsamplingError> {
    SubsamplingConfig {
        sampling_rate,
        ..SubsamplingConfig::default()
    }
    .validate()
}

/// `sqrt(s / f) + s / f`.
///
/// # Examples
///
/// ```
/// use w2v_math::retention_ratio;
/// assert_eq!(retention_ratio(1e-3, 1e-3).unwrap(), 2.0);
/// assert!(retention_ratio(0.0, 1e-3).is_err());
/// ```
pub fn retention_ratio(freq: f64, sampling_rate: f64) -> Result<f64, SubsamplingError> {
    check_frequency(freq)?;
    check_sampling_rate(sampling_rate)?;
    let r = sampling_rate / freq;
    Ok(r.sqrt() + r)
}

/// `1 - sqrt(s / f)`. Negative for `f < s`; clamp before using as a probability.
pub fn probability_linear(freq: f64, sampling_rate: f64) -> Result<f64, SubsamplingError> {
    check_frequency(freq)?;
    check_sampling_rate(sampling_rate)?;
    Ok(1.0 - (sampling_rate / freq).sqrt())
}

/// `1 - (sqrt(s / f) + s / f)`. Steeper than [`probability_linear`] for
/// frequent tokens; negative whenever the ratio exceeds 1.
pub fn probability_quadratic(freq: f64, sampling_rate: f64) -> Result<f64, SubsamplingError> {
    Ok(1.0 - retention_ratio(freq, sampling_rate)?)
}

/// Clamp a raw score into `[0, 1]`.
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(0.0, 1.0)
}

/// Probability that one occurrence is dropped: `clamp(1 - ratio)`.
pub fn discard_probability(freq: f64, sampling_rate: f64) -> Result<f64, SubsamplingError> {
    Ok(clamp_probability(probability_quadratic(freq, sampling_rate)?))
}

/// Relative frequency `count / total` of a token in a corpus.
pub fn relative_frequency(count: u64, total: u64) -> Result<f64, SubsamplingError> {
    if total == 0 {
        return Err(SubsamplingError::ZeroTotal);
    }
    if count > total {
        return Err(SubsamplingError::CountExceedsTotal { count, total });
    }
    Ok(count as f64 / total as f64)
}

/// Scoring strategy of [`SubsamplingPolicy::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubsamplingMode {
    /// `1 - sqrt(s / f)`.
    #[serde(rename = "linear")]
    ProbabilityLinear,
    /// `1 - (sqrt(s / f) + s / f)`.
    #[serde(rename = "quadratic")]
    ProbabilityQuadratic,
    /// The raw retention ratio `sqrt(s / f) + s / f`.
    #[serde(rename = "ratio")]
    Ratio,
    /// Pseudo-random keep/discard; advances the generator.
    #[serde(rename = "random")]
    RandomDecision,
}

impl SubsamplingMode {
    pub const ALL: [SubsamplingMode; 4] = [
        Self::ProbabilityLinear,
        Self::ProbabilityQuadratic,
        Self::Ratio,
        Self::RandomDecision,
    ];

    /// Name used by `Display`, `FromStr` and serde alike.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProbabilityLinear => "linear",
            Self::ProbabilityQuadratic => "quadratic",
            Self::Ratio => "ratio",
            Self::RandomDecision => "random",
        }
    }
}

impl fmt::Display for SubsamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubsamplingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown subsampling mode: {s} (expected linear, quadratic, ratio or random)"))
    }
}

/// Outcome of a random subsampling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Keep,
    Discard,
}

impl Decision {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Result of [`SubsamplingPolicy::score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    /// Unclamped real-valued score from the probability and ratio modes.
    Probability(f64),
    Decision(Decision),
}

impl Score {
    pub fn as_probability(&self) -> Option<f64> {
        match self {
            Self::Probability(p) => Some(*p),
            Self::Decision(_) => None,
        }
    }

    pub fn as_decision(&self) -> Option<Decision> {
        match self {
            Self::Decision(d) => Some(*d),
            Self::Probability(_) => None,
        }
    }
}

/// A sampling threshold plus the generator that drives random decisions.
///
/// Only [`decide`](Self::decide) (and [`score`](Self::score) in
/// [`SubsamplingMode::RandomDecision`]) touch the generator, and they need
/// `&mut self`, so one decision sequence has exactly one owner. Wrap the policy
/// in a [`SharedSubsamplingPolicy`](crate::SharedSubsamplingPolicy) to share a
/// sequence between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsamplingPolicy {
    sampling_rate: f64,
    rng: Lcg,
}

impl SubsamplingPolicy {
    /// Policy with the default seed.
    pub fn new(sampling_rate: f64) -> Result<Self, SubsamplingError> {
        Self::with_rng(sampling_rate, Lcg::default())
    }

    pub fn with_seed(sampling_rate: f64, seed: u64) -> Result<Self, SubsamplingError> {
        Self::with_rng(sampling_rate, Lcg::new(seed))
    }

    pub fn with_rng(sampling_rate: f64, rng: Lcg) -> Result<Self, SubsamplingError> {
        check_sampling_rate(sampling_rate)?;
        Ok(Self { sampling_rate, rng })
    }

    pub fn from_config(config: &SubsamplingConfig) -> Result<Self, SubsamplingError> {
        Self::with_seed(config.sampling_rate, config.seed)
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Current generator state.
    pub fn state(&self) -> u64 {
        self.rng.state()
    }

    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "reseeding subsampling policy");
        self.rng.reseed(seed);
    }

    pub fn ratio(&self, freq: f64) -> Result<f64, SubsamplingError> {
        retention_ratio(freq, self.sampling_rate)
    }

    pub fn probability_linear(&self, freq: f64) -> Result<f64, SubsamplingError> {
        probability_linear(freq, self.sampling_rate)
    }

    pub fn probability_quadratic(&self, freq: f64) -> Result<f64, SubsamplingError> {
        probability_quadratic(freq, self.sampling_rate)
    }

    /// Keep or discard one occurrence of a token with relative frequency `freq`.
    ///
    /// Advances the generator exactly once, then discards if
    /// `ratio < (state & 0xFFFF) / 65535`. An invalid `freq` fails before the
    /// generator moves.
    pub fn decide(&mut self, freq: f64) -> Result<Decision, SubsamplingError> {
        let ratio = self.ratio(freq)?;
        let draw = self.rng.next_u16();
        let threshold = draw as f64 / DECISION_DIVISOR;
        let decision = if ratio < threshold {
            Decision::Discard
        } else {
            Decision::Keep
        };
        trace!(freq, ratio, draw, ?decision, "subsampling decision");
        Ok(decision)
    }

    /// Apply [`decide`](Self::decide) to each frequency in order.
    ///
    /// Every frequency is validated first; on error the generator is untouched.
    pub fn decide_all(&mut self, freqs: &[f64]) -> Result<Vec<Decision>, SubsamplingError> {
        freqs.iter().try_for_each(|&f| check_frequency(f))?;
        freqs.iter().map(|&f| self.decide(f)).collect()
    }

    /// Score `freq` under `mode`.
    pub fn score(&mut self, freq: f64, mode: SubsamplingMode) -> Result<Score, SubsamplingError> {
        Ok(match mode {
            SubsamplingMode::ProbabilityLinear => Score::Probability(self.probability_linear(freq)?),
            SubsamplingMode::ProbabilityQuadratic => {
                Score::Probability(self.probability_quadratic(freq)?)
            }
            SubsamplingMode::Ratio => Score::Probability(self.ratio(freq)?),
            SubsamplingMode::RandomDecision => Score::Decision(self.decide(freq)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use w2v_core::constants::{DEFAULT_SAMPLING_RATE, LCG_SEED};

    fn policy() -> SubsamplingPolicy {
        SubsamplingPolicy::new(DEFAULT_SAMPLING_RATE).unwrap()
    }

    // --- free functions ---

    #[test]
    fn linear_is_zero_at_threshold() {
        for s in [1e-3, 1e-4, 1e-5, 1e-6] {
            assert_eq!(probability_linear(s, s).unwrap(), 0.0);
        }
    }

    #[test]
    fn linear_negative_below_threshold() {
        assert!(probability_linear(1e-4, 1e-3).unwrap() < 0.0);
    }

    #[test]
    fn quadratic_at_threshold_is_minus_one() {
        assert_eq!(probability_quadratic(1e-3, 1e-3).unwrap(), -1.0);
    }

    #[test]
    fn quadratic_below_linear() {
        for f in [0.001, 0.01, 0.1, 0.5, 1.0] {
            assert!(probability_quadratic(f, 1e-3).unwrap() < probability_linear(f, 1e-3).unwrap());
        }
    }

    #[test]
    fn ratio_known_value() {
        // s/f = 0.01 → 0.1 + 0.01
        let r = retention_ratio(0.1, 1e-3).unwrap();
        assert!((r - 0.11).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_frequency() {
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                probability_linear(bad, 1e-3),
                Err(SubsamplingError::InvalidFrequency(_))
            ));
            assert!(retention_ratio(bad, 1e-3).is_err());
        }
    }

    #[test]
    fn rejects_non_positive_sampling_rate() {
        assert!(matches!(
            probability_linear(0.1, 0.0),
            Err(SubsamplingError::InvalidSamplingRate(_))
        ));
        assert!(SubsamplingPolicy::new(-1e-3).is_err());
        assert!(SubsamplingPolicy::new(f64::NAN).is_err());
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_probability(-3.2), 0.0);
        assert_eq!(clamp_probability(0.25), 0.25);
        assert_eq!(clamp_probability(1.5), 1.0);
    }

    #[test]
    fn discard_probability_is_bounded() {
        assert_eq!(discard_probability(1e-4, 1e-3).unwrap(), 0.0);
        let p = discard_probability(0.5, 1e-3).unwrap();
        assert!(p > 0.9 && p < 1.0);
    }

    #[test]
    fn relative_frequency_cases() {
        assert_eq!(relative_frequency(25, 100).unwrap(), 0.25);
        assert_eq!(relative_frequency(1, 0), Err(SubsamplingError::ZeroTotal));
        assert_eq!(
            relative_frequency(5, 3),
            Err(SubsamplingError::CountExceedsTotal { count: 5, total: 3 })
        );
    }

    // --- mode parsing ---

    #[test]
    fn mode_round_trips_through_str() {
        for m in SubsamplingMode::ALL {
            assert_eq!(m.to_string().parse::<SubsamplingMode>().unwrap(), m);
        }
        assert_eq!("LINEAR".parse::<SubsamplingMode>().unwrap(), SubsamplingMode::ProbabilityLinear);
        assert!("cubic".parse::<SubsamplingMode>().is_err());
    }

    #[test]
    fn serde_name_matches_display() {
        for m in SubsamplingMode::ALL {
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{m}\""));
            assert_eq!(serde_json::from_str::<SubsamplingMode>(&json).unwrap(), m);
        }
    }

    #[test]
    fn score_serializes_untagged() {
        let p = serde_json::to_string(&Score::Probability(0.5)).unwrap();
        assert_eq!(p, "0.5");
        let d = serde_json::to_string(&Score::Decision(Decision::Discard)).unwrap();
        assert_eq!(d, "\"discard\"");
    }

    // --- policy ---

    #[test]
    fn new_policy_starts_at_seed() {
        let p = policy();
        assert_eq!(p.state(), LCG_SEED);
        assert_eq!(p.sampling_rate(), DEFAULT_SAMPLING_RATE);
    }

    #[test]
    fn from_config_uses_seed() {
        let cfg = SubsamplingConfig {
            sampling_rate: 1e-5,
            seed: 7,
        };
        let p = SubsamplingPolicy::from_config(&cfg).unwrap();
        assert_eq!(p.state(), 7);
        assert_eq!(p.sampling_rate(), 1e-5);
    }

    #[test]
    fn reference_decisions_from_seed_one() {
        let mut p = policy();
        let freqs = [0.001, 0.01, 0.1, 0.5, 0.002, 1.0, 0.0005, 0.05];
        let got = p.decide_all(&freqs).unwrap();
        use Decision::{Discard, Keep};
        assert_eq!(got, vec![Keep, Discard, Discard, Discard, Keep, Discard, Keep, Discard]);
        assert_eq!(p.state(), 3_765_556_857_683_346_793);
    }

    #[test]
    fn decide_advances_once() {
        let mut p = policy();
        p.decide(0.3).unwrap();
        assert_eq!(p.state(), 25_214_903_928);
    }

    #[test]
    fn invalid_frequency_does_not_advance() {
        let mut p = policy();
        assert!(p.decide(0.0).is_err());
        assert_eq!(p.state(), LCG_SEED);
        assert!(p.score(-1.0, SubsamplingMode::RandomDecision).is_err());
        assert_eq!(p.state(), LCG_SEED);
    }

    #[test]
    fn decide_all_validates_before_mutating() {
        let mut p = policy();
        assert!(p.decide_all(&[0.1, 0.2, 0.0]).is_err());
        assert_eq!(p.state(), LCG_SEED);
    }

    #[test]
    fn probability_modes_do_not_advance() {
        let mut p = policy();
        for m in [
            SubsamplingMode::ProbabilityLinear,
            SubsamplingMode::ProbabilityQuadratic,
            SubsamplingMode::Ratio,
        ] {
            assert!(p.score(0.1, m).unwrap().as_probability().is_some());
        }
        assert_eq!(p.state(), LCG_SEED);
        assert!(p.score(0.1, SubsamplingMode::RandomDecision).unwrap().as_decision().is_some());
        assert_ne!(p.state(), LCG_SEED);
    }

    #[test]
    fn rare_tokens_always_kept() {
        // ratio >= 2 at or below the threshold, above any draw / 65535.
        let mut p = policy();
        for _ in 0..1000 {
            assert_eq!(p.decide(DEFAULT_SAMPLING_RATE).unwrap(), Decision::Keep);
        }
    }

    #[test]
    fn reseed_replays_decisions() {
        let mut p = policy();
        let freqs: Vec<f64> = (1..100).map(|i| i as f64 * 0.001).collect();
        let first = p.decide_all(&freqs).unwrap();
        p.reseed(LCG_SEED);
        assert_eq!(p.decide_all(&freqs).unwrap(), first);
    }

    proptest! {
        #[test]
        fn linear_increasing_in_freq(a in 1e-6f64..1.0, b in 1e-6f64..1.0, s in 1e-6f64..1e-2) {
            prop_assume!(a != b);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(probability_linear(lo, s).unwrap() <= probability_linear(hi, s).unwrap());
        }

        #[test]
        fn ratio_decreasing_in_freq(a in 1e-6f64..1.0, b in 1e-6f64..1.0, s in 1e-6f64..1e-2) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(retention_ratio(lo, s).unwrap() >= retention_ratio(hi, s).unwrap());
        }

        #[test]
        fn discard_probability_in_unit_interval(f in 1e-9f64..1.0, s in 1e-9f64..1.0) {
            let p = discard_probability(f, s).unwrap();
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn same_seed_same_decisions(seed in any::<u64>(), freqs in proptest::collection::vec(1e-6f64..1.0, 1..64)) {
            let mut a = SubsamplingPolicy::with_seed(1e-3, seed).unwrap();
            let mut b = SubsamplingPolicy::with_seed(1e-3, seed).unwrap();
            prop_assert_eq!(a.decide_all(&freqs).unwrap(), b.decide_all(&freqs).unwrap());
            prop_assert_eq!(a.state(), b.state());
        }

        #[test]
        fn decision_matches_shared_generator(seed in any::<u64>(), f in 1e-6f64..1.0) {
            let mut p = SubsamplingPolicy::with_seed(1e-3, seed).unwrap();
            let mut rng = Lcg::new(seed);
            let draw = rng.next_u16() as f64 / DECISION_DIVISOR;
            let expected = if retention_ratio(f, 1e-3).unwrap() < draw { Decision::Discard } else { Decision::Keep };
            prop_assert_eq!(p.decide(f).unwrap(), expected);
            prop_assert_eq!(p.state(), rng.state());
        }
    }
}
