use tracing::debug;

/// A supplier of cryptographically secure random bytes.
///
/// Failing to produce random data is fatal: implementations panic instead of
/// handing back bytes that are not random.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]);
}

/// Entropy from the operating system.
#[derive(Debug, Default, Copy, Clone)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) {
        fill_bytes(buf);
    }
}

fn fill_bytes(buf: &mut [u8]) {
    if let Err(err) = getrandom::fill(buf) {
        panic!("entropy read error: {err}");
    }
}

/// Draws a 64 bit seed from the operating system.
pub fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    fill_bytes(&mut bytes);
    let seed = u64::from_le_bytes(bytes);
    debug!("Drew seed from OS entropy");
    seed
}
