//! Fixed-length strings of random ASCII characters.
//!
//! Two generators share the [`CharGenerator`] interface: [`FastGenerator`]
//! is a seedable PCG stream for throughput and reproducible output,
//! [`SecureGenerator`] samples bytes read straight from the operating
//! system's CSPRNG. Both map raw randomness onto the chosen [`Charset`]
//! without modulo bias.
//!
//! ```
//! use randchars::{CharGenerator, Charset, FastGenerator};
//!
//! let mut generator = FastGenerator::from_seed(0);
//! assert_eq!(generator.generate(Charset::AlphaNum, 12), b"AMp00A7cpFLj");
//! ```

pub mod charset;
pub mod fast;
pub mod generator;
pub mod random;
pub mod secure;
pub mod shared;

pub use charset::{Charset, CharsetError};
pub use fast::FastGenerator;
pub use generator::CharGenerator;
pub use random::{EntropySource, OsEntropy};
pub use secure::{DEFAULT_CACHE_SIZE, SecureGenerator};
pub use shared::SharedGenerator;
