//! # w2v-core
//! Foundation constants, error types, configuration and traits shared by the
//! w2v-numerics crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
