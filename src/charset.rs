use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

const ALPHA_NUM: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER_ALPHA_NUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const LOWER_ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER_ALPHA_NUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const UPPER_ALPHA: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE64: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789+/";
const BASE64_URL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-_";

// Samplers take the alphabet size as a u8.
const _: () = assert!(BASE64.len() < 256 && BASE64_URL.len() < 256 && ALPHA_NUM.len() < 256);

/// Named character sets. Names parse ASCII case-insensitively.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Charset {
    #[strum(to_string = "alphanum")]
    AlphaNum,
    #[strum(to_string = "alpha")]
    Alpha,
    #[strum(
        to_string = "loweralphanum",
        serialize = "lower-alphanum",
        serialize = "lalphanum"
    )]
    LowerAlphaNum,
    #[strum(to_string = "loweralpha", serialize = "lower-alpha", serialize = "lalpha")]
    LowerAlpha,
    #[strum(
        to_string = "upperalphanum",
        serialize = "upper-alphanum",
        serialize = "ualphanum"
    )]
    UpperAlphaNum,
    #[strum(to_string = "upperalpha", serialize = "upper-alpha", serialize = "ualpha")]
    UpperAlpha,
    #[default]
    #[strum(to_string = "base64")]
    Base64,
    #[strum(to_string = "base64url", serialize = "base64-url")]
    Base64Url,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("{name:?} is not supported")]
    Unsupported { name: String },
}

impl Charset {
    pub fn from_name(name: &str) -> Result<Self, CharsetError> {
        Charset::from_str(name).map_err(|_| CharsetError::Unsupported {
            name: name.to_string(),
        })
    }

    /// The ordered characters this charset draws from.
    pub const fn alphabet(self) -> &'static [u8] {
        match self {
            Charset::AlphaNum => ALPHA_NUM,
            Charset::Alpha => ALPHA,
            Charset::LowerAlphaNum => LOWER_ALPHA_NUM,
            Charset::LowerAlpha => LOWER_ALPHA,
            Charset::UpperAlphaNum => UPPER_ALPHA_NUM,
            Charset::UpperAlpha => UPPER_ALPHA,
            Charset::Base64 => BASE64,
            Charset::Base64Url => BASE64_URL,
        }
    }

    pub const fn size(self) -> u8 {
        self.alphabet().len() as u8
    }
}
