//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG that is deterministic and suitable for simulation
//! purposes. Same seed produces the same sequence, which is what makes
//! simulation runs reproducible: breakdown rolls, repair durations, and order
//! generation all draw from one shared `RngManager`.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use dispatch_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let price = rng.range_inclusive(5_000, 100_000);
/// assert!((5_000..=100_000).contains(&price));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is remapped to 1 (xorshift state must be non-zero).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value, advancing the internal state
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max]
    ///
    /// # Panics
    /// Panics if min > max
    pub fn range_inclusive(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "min must not exceed max");

        let value = self.next();
        let range_size = (max - min) as u64 + 1;
        min + (value % range_size) as i64
    }

    /// Bernoulli trial: returns true with probability `p`
    ///
    /// `p = 0.0` never fires, `p = 1.0` always fires.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // 53 high-quality bits into the mantissa
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
