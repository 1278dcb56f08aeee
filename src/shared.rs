use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::charset::{Charset, CharsetError};
use crate::fast::FastGenerator;
use crate::generator::CharGenerator;
use crate::secure::SecureGenerator;

static FAST: LazyLock<SharedGenerator<FastGenerator>> =
    LazyLock::new(|| SharedGenerator::new(FastGenerator::new()));

static SECURE: LazyLock<SharedGenerator<SecureGenerator>> =
    LazyLock::new(|| SharedGenerator::new(SecureGenerator::new()));

/// A generator that can be used from several threads at once.
///
/// The lock is held for a whole string, so the characters of one call are
/// always a contiguous run of the underlying sequence.
#[derive(Debug)]
pub struct SharedGenerator<G> {
    inner: Mutex<G>,
}

impl<G: CharGenerator> SharedGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self {
            inner: Mutex::new(generator),
        }
    }

    pub fn generate(&self, charset: Charset, n: usize) -> Vec<u8> {
        self.lock().generate(charset, n)
    }

    pub fn generate_named(&self, name: &str, n: usize) -> Result<Vec<u8>, CharsetError> {
        let charset = Charset::from_name(name)?;
        Ok(self.generate(charset, n))
    }

    pub fn reseed(&self) {
        self.lock().reseed();
    }

    /// Runs `f` with exclusive access, e.g. to seed and draw as one step.
    pub fn with<R>(&self, f: impl FnOnce(&mut G) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn into_inner(self) -> G {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, G> {
        // The generator state stays as the panicking draw left it, so a
        // seeded sequence carries on; call `reseed` to start over.
        self.inner.lock().unwrap_or_else(|err| {
            warn!("Generator lock was poisoned");
            err.into_inner()
        })
    }
}

/// The process-wide fast generator, seeded from OS entropy on first use.
pub fn fast() -> &'static SharedGenerator<FastGenerator> {
    &FAST
}

/// The process-wide secure generator.
pub fn secure() -> &'static SharedGenerator<SecureGenerator> {
    &SECURE
}

pub fn alpha_num(n: usize) -> Vec<u8> {
    FAST.generate(Charset::AlphaNum, n)
}

pub fn alpha(n: usize) -> Vec<u8> {
    FAST.generate(Charset::Alpha, n)
}

pub fn lower_alpha_num(n: usize) -> Vec<u8> {
    FAST.generate(Charset::LowerAlphaNum, n)
}

pub fn lower_alpha(n: usize) -> Vec<u8> {
    FAST.generate(Charset::LowerAlpha, n)
}

pub fn upper_alpha_num(n: usize) -> Vec<u8> {
    FAST.generate(Charset::UpperAlphaNum, n)
}

pub fn upper_alpha(n: usize) -> Vec<u8> {
    FAST.generate(Charset::UpperAlpha, n)
}

pub fn base64(n: usize) -> Vec<u8> {
    FAST.generate(Charset::Base64, n)
}

pub fn base64_url(n: usize) -> Vec<u8> {
    FAST.generate(Charset::Base64Url, n)
}
