use crate::charset::{Charset, CharsetError};

/// The operations shared by the fast and the secure generator.
///
/// Implementors supply the bounded sampler and reseeding; everything else
/// is built on top of [`CharGenerator::sample`].
pub trait CharGenerator {
    /// Returns a value uniformly distributed in `[0, bound)`.
    ///
    /// Panics if `bound` is zero.
    fn sample(&mut self, bound: u8) -> u8;

    /// Replaces the internal state with fresh state from the entropy source.
    fn reseed(&mut self);

    /// Generates `n` characters drawn independently from `charset`.
    fn generate(&mut self, charset: Charset, n: usize) -> Vec<u8> {
        let alphabet = charset.alphabet();
        let bound = charset.size();
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(alphabet[self.sample(bound) as usize]);
        }
        out
    }

    /// Like [`CharGenerator::generate`], resolving the charset by name first.
    fn generate_named(&mut self, name: &str, n: usize) -> Result<Vec<u8>, CharsetError> {
        let charset = Charset::from_name(name)?;
        Ok(self.generate(charset, n))
    }

    fn alpha_num(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::AlphaNum, n)
    }

    fn alpha(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::Alpha, n)
    }

    fn lower_alpha_num(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::LowerAlphaNum, n)
    }

    fn lower_alpha(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::LowerAlpha, n)
    }

    fn upper_alpha_num(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::UpperAlphaNum, n)
    }

    fn upper_alpha(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::UpperAlpha, n)
    }

    fn base64(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::Base64, n)
    }

    fn base64_url(&mut self, n: usize) -> Vec<u8> {
        self.generate(Charset::Base64Url, n)
    }
}

impl<G: CharGenerator + ?Sized> CharGenerator for Box<G> {
    fn sample(&mut self, bound: u8) -> u8 {
        (**self).sample(bound)
    }

    fn reseed(&mut self) {
        (**self).reseed()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    /// Walks the index space in order so output is predictable.
    struct Counter(u32);

    impl CharGenerator for Counter {
        fn sample(&mut self, bound: u8) -> u8 {
            let value = (self.0 % u32::from(bound)) as u8;
            self.0 += 1;
            value
        }

        fn reseed(&mut self) {
            self.0 = 0;
        }
    }

    #[test]
    fn generate_indexes_into_alphabet() {
        let mut g = Counter(0);
        assert_eq!(g.lower_alpha(5), b"abcde");
        assert_eq!(g.upper_alpha(3), b"FGH");
        g.reseed();
        assert_eq!(g.alpha_num(3), b"abc");
    }

    #[test]
    fn zero_length_is_empty() {
        let mut g = Counter(0);
        for charset in Charset::iter() {
            assert!(g.generate(charset, 0).is_empty());
        }
    }

    #[test]
    fn length_is_exact() {
        let mut g = Counter(0);
        for n in [1, 7, 64, 1000] {
            assert_eq!(g.base64(n).len(), n);
        }
    }

    #[test]
    fn generate_named_rejects_unknown_charset() {
        let mut g = Counter(0);
        assert!(g.generate_named("nope", 4).is_err());
        assert_eq!(g.generate_named("UPPERALPHA", 2).unwrap(), b"AB");
    }

    #[test]
    fn boxed_generators_forward() {
        let mut g: Box<dyn CharGenerator> = Box::new(Counter(25));
        assert_eq!(g.lower_alpha(2), b"za");
    }
}
