use rand_core::RngCore;
use rand_pcg::Pcg32;
use tracing::debug;

use crate::generator::CharGenerator;
use crate::random::random_seed;

/// A fast, reproducible generator backed by PCG-XSH-RR 64/32.
///
/// Not suitable for secrets. Two generators given the same seed and stream
/// produce the same characters.
#[derive(Debug, Clone)]
pub struct FastGenerator {
    rng: Pcg32,
}

impl FastGenerator {
    /// Seeds a new generator from OS entropy.
    pub fn new() -> Self {
        Self::from_seed(random_seed())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::from_seed_with_state(seed, 0)
    }

    pub fn from_seed_with_state(seed: u64, stream: u64) -> Self {
        Self {
            rng: Pcg32::new(seed, stream),
        }
    }

    pub fn seed(&mut self, seed: u64) {
        self.seed_with_state(seed, 0);
    }

    /// Restarts the sequence at `seed` on the stream selected by `stream`.
    pub fn seed_with_state(&mut self, seed: u64, stream: u64) {
        debug!(stream, "Seeding fast generator");
        self.rng = Pcg32::new(seed, stream);
    }

    /// Returns a value uniformly distributed in `[0, bound)`.
    ///
    /// Words below `2^32 mod bound` are rejected so the remaining range is a
    /// whole multiple of `bound`.
    pub fn bound(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be positive");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let word = self.rng.next_u32();
            if word >= threshold {
                return word % bound;
            }
        }
    }
}

impl Default for FastGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CharGenerator for FastGenerator {
    fn sample(&mut self, bound: u8) -> u8 {
        self.bound(u32::from(bound)) as u8
    }

    fn reseed(&mut self) {
        self.seed(random_seed());
    }
}
