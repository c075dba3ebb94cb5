//! Cross-crate test suite for w2v-numerics.
//!
//! Integration tests that pin the sigmoid table and the subsampling
//! generator to reference values and check their invariants under
//! randomized inputs.

pub mod helpers;
