//! `crcsum`: walk a file in bounded windows and print its CRC.
//!
//! Defaults come from [`Config`] and the `CRCWALK_*` environment; flags win
//! over both. Progress is logged through `tracing` (`RUST_LOG=debug` shows
//! one event per fragment).

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use crcwalk::{Config, Crc, Strategy, catalog::Catalog};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crcsum", version, about = "Streaming CRC of a file", long_about = None)]
struct Cli {
  /// Polynomial degree: 3, 8, 16, 32 or 64
  #[arg(short = 'w', long = "width")]
  width: Option<u8>,

  /// File to checksum
  #[arg(short, long)]
  file: PathBuf,

  /// Engine: 0/bitserial, 1/bytewise, 2/table
  #[arg(short = 'o', long = "optimize")]
  strategy: Option<Strategy>,

  /// Window size in bytes
  #[arg(long)]
  chunk_size: Option<usize>,

  /// Parameter table: even (CCITT-FALSE) or odd (KERMIT)
  #[arg(long)]
  catalog: Option<Catalog>,
}

impl Cli {
  fn config(&self, base: Config) -> Config {
    let mut config = base;
    if let Some(width) = self.width {
      config.degree = width;
    }
    if let Some(strategy) = self.strategy {
      config.strategy = strategy;
    }
    if let Some(chunk_size) = self.chunk_size {
      config.chunk_size = chunk_size;
    }
    if let Some(catalog) = self.catalog {
      config.catalog = catalog;
    }
    config
  }
}

/// Replace an unsupported degree with the default one.
fn fall_back(config: Config) -> Config {
  match config.params() {
    Ok(_) => config,
    Err(err) => {
      let fallback = Config::default().degree;
      warn!(%err, fallback, "unsupported width, using the default");
      Config {
        degree: fallback,
        ..config
      }
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let config = fall_back(cli.config(Config::default().apply_env()));
  let params = config.params()?;
  let crc = Crc::new(params, config.strategy);
  info!(
    params = params.name,
    strategy = %config.strategy,
    chunk_size = config.chunk_size,
    "computing checksum"
  );

  let mut walker = crc
    .open(&cli.file, config.chunk_size)
    .with_context(|| format!("cannot open {}", cli.file.display()))?;
  if let Some(size) = walker.size() {
    info!(file = %cli.file.display(), bytes = size, "file opened");
  }

  let checksum = crc
    .walk_with(&mut walker, |index, fragment| {
      debug!(fragment = index, bytes = fragment.fresh().len(), last = fragment.is_last(), "keep walking");
    })
    .with_context(|| format!("failed while reading {}", cli.file.display()))?;

  println!("CRC checksum: 0x{checksum}");
  Ok(())
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_config() {
    let cli = Cli::parse_from(["crcsum", "-w", "16", "-f", "x", "-o", "2", "--chunk-size", "100", "--catalog", "odd"]);
    let config = cli.config(Config::default());
    assert_eq!(config.degree, 16);
    assert_eq!(config.strategy, Strategy::Table);
    assert_eq!(config.chunk_size, 100);
    assert_eq!(config.catalog, Catalog::Odd);
    assert_eq!(config.params().unwrap().name, "CRC-16/KERMIT");
  }

  #[test]
  fn missing_flags_keep_config() {
    let cli = Cli::parse_from(["crcsum", "--file", "x"]);
    let base = Config {
      strategy: Strategy::Bytewise,
      ..Config::default()
    };
    assert_eq!(cli.config(base), base);
  }

  #[test]
  fn strategy_names_parse() {
    let cli = Cli::parse_from(["crcsum", "-f", "x", "--optimize", "bytewise"]);
    assert_eq!(cli.strategy, Some(Strategy::Bytewise));
    assert!(Cli::try_parse_from(["crcsum", "-f", "x", "-o", "7"]).is_err());
  }

  #[test]
  fn unsupported_width_falls_back_to_32() {
    let config = fall_back(Config {
      degree: 7,
      ..Config::default()
    });
    assert_eq!(config.degree, 32);
    let kept = fall_back(Config {
      degree: 8,
      ..Config::default()
    });
    assert_eq!(kept.degree, 8);
  }
}
