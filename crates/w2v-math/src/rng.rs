//! Linear-congruential generator.
//!
//! `state = state * 25214903917 + 11 (mod 2^64)`. Every consumer of random
//! numbers in a trainer (subsampling, window shrinking, weight initialization)
//! draws from this recurrence. The state is a plain value: two generators with
//! the same seed and the same call sequence produce the same outputs.

use w2v_core::constants::{
    LCG_INCREMENT, LCG_LOW_MASK, LCG_MULTIPLIER, LCG_SEED, UNIT_DIVISOR,
};
use w2v_core::error::SubsamplingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(LCG_SEED)
    }
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current state, i.e. the value produced by the last advance.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn reseed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Advance once and return the new state.
    pub fn next_state(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Advance once and return the low 16 bits of the new state.
    pub fn next_u16(&mut self) -> u16 {
        (self.next_state() & LCG_LOW_MASK) as u16
    }

    /// Advance once and map the low 16 bits onto `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.next_u16() as f64 / UNIT_DIVISOR
    }

    /// Advance once and return `state % n`.
    ///
    /// Fails without advancing when `n == 0`.
    pub fn next_below(&mut self, n: u64) -> Result<u64, SubsamplingError> {
        if n == 0 {
            return Err(SubsamplingError::ZeroModulus);
        }
        Ok(self.next_state() % n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_seed_is_one() {
        assert_eq!(Lcg::default().state(), 1);
    }

    #[test]
    fn first_states_from_seed_one() {
        let mut rng = Lcg::default();
        assert_eq!(rng.next_state(), 25_214_903_928);
        assert_eq!(rng.next_state(), 8_602_081_314_781_131_043);
        assert_eq!(rng.next_state(), 4_749_291_277_619_109_362);
    }

    #[test]
    fn low_bits_from_seed_one() {
        let mut rng = Lcg::default();
        let draws: Vec<u16> = (0..4).map(|_| rng.next_u16()).collect();
        assert_eq!(draws, vec![59_000, 61_731, 7_666, 11_285]);
    }

    #[test]
    fn wraps_modulo_two_pow_64() {
        let mut rng = Lcg::new(u64::MAX);
        let expected = u64::MAX.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
        assert_eq!(rng.next_state(), expected);
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut rng = Lcg::default();
        let first: Vec<u64> = (0..5).map(|_| rng.next_state()).collect();
        rng.reseed(LCG_SEED);
        let second: Vec<u64> = (0..5).map(|_| rng.next_state()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn next_below_zero_does_not_advance() {
        let mut rng = Lcg::default();
        assert_eq!(rng.next_below(0), Err(SubsamplingError::ZeroModulus));
        assert_eq!(rng.state(), LCG_SEED);
    }

    #[test]
    fn next_below_is_state_modulo() {
        let mut rng = Lcg::default();
        assert_eq!(rng.next_below(5).unwrap(), 25_214_903_928 % 5);
    }

    #[test]
    fn next_unit_first_draw() {
        let mut rng = Lcg::default();
        assert_eq!(rng.next_unit(), 59_000.0 / 65_536.0);
    }

    proptest! {
        #[test]
        fn unit_in_half_open_interval(seed in any::<u64>()) {
            let mut rng = Lcg::new(seed);
            for _ in 0..32 {
                let u = rng.next_unit();
                prop_assert!((0.0..1.0).contains(&u));
            }
        }

        #[test]
        fn same_seed_same_sequence(seed in any::<u64>()) {
            let mut a = Lcg::new(seed);
            let mut b = Lcg::new(seed);
            for _ in 0..32 {
                prop_assert_eq!(a.next_state(), b.next_state());
            }
        }

        #[test]
        fn below_is_bounded(seed in any::<u64>(), n in 1u64..1000) {
            let mut rng = Lcg::new(seed);
            prop_assert!(rng.next_below(n).unwrap() < n);
        }
    }
}
