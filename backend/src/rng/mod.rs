//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, seeded random number generation.
//! All randomness in the crate (weight init, learner noise) goes through this module.

mod xorshift;

pub use xorshift::RngManager;
