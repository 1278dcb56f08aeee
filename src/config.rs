use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use randchars::{Charset, CharsetError};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Generates lines of random characters, one line per LENGTH.
#[derive(Parser, Debug)]
#[command(name = "randchars", version, about, long_about = None)]
pub struct Cli {
    /// Output destination; `stdout` or `-` write to standard output
    #[arg(short = 'o', value_name = "PATH", default_value = "stdout")]
    output: String,

    /// Charset: alphanum, alpha, loweralphanum, loweralpha, upperalphanum,
    /// upperalpha, base64 or base64url [default: $RANDCHARS_CHARS or base64]
    #[arg(long, value_name = "NAME")]
    chars: Option<String>,

    /// Use a CSPRNG
    #[arg(short = 'c')]
    secure: bool,

    /// Number of characters on each line
    #[arg(value_name = "LENGTH", required = true, allow_negative_numbers = true)]
    lengths: Vec<String>,
}

pub struct Config {
    pub lengths: Vec<usize>,
    pub total: usize,
    pub charset: Charset,
    pub secure: bool,
    pub output: Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

/// Settings taken from the environment before any flags are read.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub charset: Charset,
    pub log_level: LevelFilter,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error("{value:?}: invalid character amount; must be a non-negative integer")]
    InvalidLength { value: String },
    #[error("{total}: invalid character amount; must be > 0")]
    NonPositiveTotal { total: usize },
    #[error("total character amount is too large")]
    TotalOverflow,
    #[error(transparent)]
    Charset(#[from] CharsetError),
    #[error("environment variable {name} is not valid unicode")]
    InvalidUnicode { name: &'static str },
    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidVar { name: &'static str, value: String },
}

impl Defaults {
    pub fn from_env() -> Result<Self, ConfigError> {
        let charset = match read_env("RANDCHARS_CHARS")? {
            Some(name) => Charset::from_name(&name)?,
            None => Charset::default(),
        };
        let log_level = match read_env("RANDCHARS_LOG")? {
            Some(value) => LevelFilter::from_str(&value).map_err(|_| ConfigError::InvalidVar {
                name: "RANDCHARS_LOG",
                value,
            })?,
            None => LevelFilter::WARN,
        };
        Ok(Self { charset, log_level })
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            charset: Charset::default(),
            log_level: LevelFilter::WARN,
        }
    }
}

impl Config {
    /// Parses a full argument list, program name first.
    ///
    /// Besides the usual `--chars` and `--help`, the single-dash forms
    /// `-chars` and `-help` are accepted.
    pub fn from_args<I, T>(args: I, defaults: &Defaults) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let cli = Cli::try_parse_from(single_dash_long_flags(args))?;
        Self::from_cli(cli, defaults)
    }

    pub fn from_cli(cli: Cli, defaults: &Defaults) -> Result<Self, ConfigError> {
        let mut lengths = Vec::with_capacity(cli.lengths.len());
        for value in cli.lengths {
            let length = value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidLength { value })?;
            lengths.push(length);
        }
        let total = lengths
            .iter()
            .try_fold(0usize, |acc, n| acc.checked_add(*n))
            .ok_or(ConfigError::TotalOverflow)?;
        if total == 0 {
            return Err(ConfigError::NonPositiveTotal { total });
        }

        let charset = match cli.chars {
            Some(name) => Charset::from_name(&name)?,
            None => defaults.charset,
        };
        let output = match cli.output.as_str() {
            "stdout" | "-" => Output::Stdout,
            _ => Output::File(PathBuf::from(cli.output)),
        };

        Ok(Self {
            lengths,
            total,
            charset,
            secure: cli.secure,
            output,
        })
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("stdout"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn single_dash_long_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut in_flags = true;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if !in_flags {
                return arg;
            }
            let rewritten = match arg.to_str() {
                Some("--") => {
                    in_flags = false;
                    None
                }
                Some("-help") => Some(OsString::from("--help")),
                Some(s) if s == "-chars" || s.starts_with("-chars=") => {
                    Some(OsString::from(format!("-{s}")))
                }
                _ => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn read_env(name: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidUnicode { name }),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use strum::IntoEnumIterator;

    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let argv = std::iter::once("randchars").chain(args.iter().copied());
        Config::from_args(argv, &Defaults::default())
    }

    fn config(args: &[&str]) -> Config {
        match parse(args) {
            Ok(config) => config,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    fn args_error(args: &[&str]) -> ErrorKind {
        match parse(args) {
            Err(ConfigError::Args(err)) => err.kind(),
            Err(err) => panic!("unexpected config error: {err}"),
            Ok(_) => panic!("expected an argument error"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let config = config(&["12"]);
        assert_eq!(config.lengths, vec![12]);
        assert_eq!(config.total, 12);
        assert_eq!(config.charset, Charset::Base64);
        assert!(!config.secure);
        assert_eq!(config.output, Output::Stdout);
    }

    #[test]
    fn flags() {
        let config = config(&["-c", "-chars", "LowerAlpha", "-o", "out.txt", "3", "0", "4"]);
        assert_eq!(config.lengths, vec![3, 0, 4]);
        assert_eq!(config.total, 7);
        assert_eq!(config.charset, Charset::LowerAlpha);
        assert!(config.secure);
        assert_eq!(config.output, Output::File(PathBuf::from("out.txt")));
    }

    #[test]
    fn long_and_inline_forms() {
        let config = config(&["--chars=alpha", "-o", "-", "--", "5"]);
        assert_eq!(config.charset, Charset::Alpha);
        assert_eq!(config.output, Output::Stdout);
        assert_eq!(config.lengths, vec![5]);

        let config = self::config(&["-chars=upperalpha", "-o=stdout", "2"]);
        assert_eq!(config.charset, Charset::UpperAlpha);
        assert_eq!(config.output, Output::Stdout);
    }

    #[test]
    fn flags_may_follow_lengths() {
        let config = config(&["4", "-c"]);
        assert!(config.secure);
        assert_eq!(config.lengths, vec![4]);
    }

    #[test]
    fn help() {
        for flag in ["-h", "--help", "-help"] {
            assert_eq!(args_error(&[flag]), ErrorKind::DisplayHelp, "{flag}");
        }
        assert_eq!(args_error(&["--help", "bogus"]), ErrorKind::DisplayHelp);
    }

    #[test]
    fn help_lists_every_charset() {
        let help = Cli::command().render_help().to_string();
        for charset in Charset::iter() {
            assert!(help.contains(&charset.to_string()), "{charset}");
        }
    }

    #[test]
    fn rewrite_stops_at_separator() {
        let argv = single_dash_long_flags(["randchars", "-chars", "alpha", "--", "-help"]);
        assert_eq!(argv, ["randchars", "--chars", "alpha", "--", "-help"]);
    }

    #[test]
    fn unsupported_charset() {
        let err = parse(&["-chars", "", "10"]).err().unwrap();
        assert_eq!(err.to_string(), "\"\" is not supported");
        assert!(matches!(
            parse(&["-chars", "hex", "10"]),
            Err(ConfigError::Charset(_))
        ));
    }

    #[test]
    fn non_positive_total() {
        let err = parse(&["0"]).err().unwrap();
        assert_eq!(err.to_string(), "0: invalid character amount; must be > 0");
        assert!(matches!(
            parse(&["0", "0"]),
            Err(ConfigError::NonPositiveTotal { total: 0 })
        ));
    }

    #[test]
    fn negative_and_garbage_lengths() {
        assert!(matches!(parse(&["-3"]), Err(ConfigError::InvalidLength { .. })));
        assert!(matches!(parse(&["5", "-3"]), Err(ConfigError::InvalidLength { .. })));
        assert!(matches!(parse(&["ten"]), Err(ConfigError::InvalidLength { .. })));
    }

    #[test]
    fn argument_errors() {
        assert_eq!(args_error(&[]), ErrorKind::MissingRequiredArgument);
        assert_eq!(args_error(&["-c"]), ErrorKind::MissingRequiredArgument);
        assert_eq!(args_error(&["-x", "1"]), ErrorKind::UnknownArgument);
        assert_eq!(args_error(&["--bogus", "1"]), ErrorKind::UnknownArgument);
        assert!(matches!(parse(&["1", "-o"]), Err(ConfigError::Args(_))));
    }

    #[test]
    fn overflowing_total() {
        let max = usize::MAX.to_string();
        assert!(matches!(
            parse(&[max.as_str(), "1"]),
            Err(ConfigError::TotalOverflow)
        ));
    }

    #[test]
    fn charset_falls_back_to_defaults() {
        let defaults = Defaults {
            charset: Charset::UpperAlpha,
            log_level: LevelFilter::WARN,
        };
        let config = Config::from_args(["randchars", "2"], &defaults).unwrap();
        assert_eq!(config.charset, Charset::UpperAlpha);
    }
}
