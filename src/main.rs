use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::exit;

use anyhow::{Context, Result};
use randchars::{CharGenerator, Charset, DEFAULT_CACHE_SIZE, FastGenerator, SecureGenerator};
use tracing::{debug, info};

use crate::config::{Config, ConfigError, Defaults, Output};

pub mod config;

/// Picks the generator kind once; every line is then drawn from it.
fn build_generator(config: &Config) -> Box<dyn CharGenerator> {
    if config.secure {
        let cache_size = config.total.min(DEFAULT_CACHE_SIZE);
        info!(cache_size, "Using secure generator");
        Box::new(SecureGenerator::with_cache_size(cache_size))
    } else {
        info!("Using fast generator");
        Box::new(FastGenerator::new())
    }
}

fn open_output(output: &Output) -> Result<Box<dyn Write>> {
    let out: Box<dyn Write> = match output {
        Output::Stdout => Box::new(io::stdout().lock()),
        Output::File(path) => Box::new(
            File::create(path).with_context(|| format!("Could not open {}", path.display()))?,
        ),
    };
    Ok(out)
}

/// Writes one line per length and returns the number of characters written,
/// newlines excluded.
fn write_lines<W: Write>(
    out: &mut W,
    generator: &mut dyn CharGenerator,
    charset: Charset,
    lengths: &[usize],
) -> io::Result<usize> {
    let mut written = 0;
    for &n in lengths {
        let line = generator.generate(charset, n);
        out.write_all(&line)?;
        out.write_all(b"\n")?;
        written += line.len();
    }
    out.flush()?;
    Ok(written)
}

pub fn main() -> Result<()> {
    let defaults = Defaults::from_env().context("Could not load config")?;
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(defaults.log_level)
        .init();

    let config = match Config::from_args(env::args_os(), &defaults) {
        Ok(config) => config,
        Err(ConfigError::Args(err)) => {
            // Help and version go to stdout and succeed; usage errors fail.
            err.print().context("Could not print usage")?;
            if err.use_stderr() {
                exit(1);
            }
            return Ok(());
        }
        Err(err) => return Err(err).context("Invalid arguments"),
    };
    debug!(
        sets = config.lengths.len(),
        total = config.total,
        charset = %config.charset,
        "Parsed arguments"
    );

    let mut generator = build_generator(&config);
    let mut out = BufWriter::new(open_output(&config.output)?);
    let written = write_lines(&mut out, &mut *generator, config.charset, &config.lengths)
        .with_context(|| format!("Could not write to {}", config.output))?;
    drop(out);

    info!(written, "Generation complete");
    println!(
        "{} sets totalling {} random characters were generated and written to {}",
        config.lengths.len(),
        written,
        config.output
    );
    Ok(())
}
