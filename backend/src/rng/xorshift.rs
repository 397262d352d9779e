//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG used for weight initialization and for the
//! noise vectors of the randomized learner.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. Two networks built from the
//! same config and trained on the same data end up with identical weights,
//! which keeps training runs reproducible in tests and experiments.

use serde::{Deserialize, Serialize};

/// Multiplier of the xorshift64* output scrambler
const SCRAMBLE: u64 = 0x2545_F491_4F6C_DD1D;

/// Golden-ratio increment used to spread derived child seeds
const SEED_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use latent_bridge_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let weight = rng.uniform(-0.2, 0.2);
/// assert!((-0.2..0.2).contains(&weight));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced with 1 because xorshift never leaves the
    /// all-zero state.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(SCRAMBLE)
    }

    /// Generate random f64 in range [0.0, 1.0)
    ///
    /// # Example
    /// ```
    /// use latent_bridge_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let p = rng.next_f64();
    /// assert!(p >= 0.0 && p < 1.0);
    /// ```
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits fill the f64 mantissa exactly
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate random f64 in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        assert!(min < max, "min must be less than max");
        min + self.next_f64() * (max - min)
    }

    /// Derive an independent child generator
    ///
    /// Advances this generator once and seeds the child from the drawn
    /// value, so each call yields a distinct stream.
    pub fn fork(&mut self) -> RngManager {
        let seed = self.next().wrapping_add(SEED_SPREAD);
        RngManager::new(seed)
    }

    /// Get current RNG state (for snapshots/replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
