use std::fmt;

use tracing::debug;

use crate::generator::CharGenerator;
use crate::random::{EntropySource, OsEntropy};

/// The number of random bytes cached between entropy reads.
pub const DEFAULT_CACHE_SIZE: usize = 4096;

/// A generator that draws straight from a cryptographically secure source.
///
/// Random bytes are read in blocks of `cache_size` and consumed one at a time
/// by the rejection sampler.
pub struct SecureGenerator<E = OsEntropy> {
    source: E,
    cache: Vec<u8>,
    cursor: usize,
}

impl SecureGenerator<OsEntropy> {
    pub fn new() -> Self {
        Self::with_cache_size(DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(cache_size: usize) -> Self {
        Self::with_source(OsEntropy, cache_size)
    }
}

impl Default for SecureGenerator<OsEntropy> {
    fn default() -> Self {
        Self::new()
    }
}

// Cached bytes are future output and stay out of logs.
impl<E> fmt::Debug for SecureGenerator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureGenerator")
            .field("cache_size", &self.cache.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<E: EntropySource> SecureGenerator<E> {
    /// Panics if `cache_size` is zero.
    pub fn with_source(source: E, cache_size: usize) -> Self {
        assert!(cache_size > 0, "cache size must be positive");
        let mut generator = Self {
            source,
            cache: vec![0; cache_size],
            cursor: 0,
        };
        generator.refill();
        generator
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn refill(&mut self) {
        debug!(cache_size = self.cache.len(), "Refilling entropy cache");
        self.source.fill(&mut self.cache);
        self.cursor = 0;
    }

    fn next_byte(&mut self) -> u8 {
        // Only true when a previous refill panicked.
        if self.cursor == self.cache.len() {
            self.refill();
        }
        let byte = self.cache[self.cursor];
        self.cursor += 1;
        if self.cursor == self.cache.len() {
            self.refill();
        }
        byte
    }
}

impl<E: EntropySource> CharGenerator for SecureGenerator<E> {
    /// Rejects bytes below `256 mod bound`; the accepted range then holds an
    /// equal number of every residue.
    fn sample(&mut self, bound: u8) -> u8 {
        assert!(bound > 0, "bound must be positive");
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let byte = self.next_byte();
            if byte >= threshold {
                return byte % bound;
            }
        }
    }

    fn reseed(&mut self) {
        self.refill();
    }
}
