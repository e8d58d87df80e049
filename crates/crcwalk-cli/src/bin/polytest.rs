//! `polytest`: checksum distribution over a family of related inputs.
//!
//! Varies the low bits of a fixed pattern, checksums every variant across a
//! pool of worker threads and prints how the checksums spread.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use crcwalk::{Config, Strategy, SurveyConfig, catalog::Catalog, survey};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "polytest", version, about = "Survey CRC collisions over varied inputs", long_about = None)]
struct Cli {
  /// Polynomial degree: 3, 8, 16, 32 or 64
  #[arg(short = 'w', long = "width", default_value_t = 16)]
  width: u8,

  /// Parameter table: even (CCITT-FALSE) or odd (KERMIT)
  #[arg(long)]
  catalog: Option<Catalog>,

  /// Engine: 0/bitserial, 1/bytewise, 2/table
  #[arg(short = 'o', long = "optimize", default_value_t = Strategy::Table)]
  strategy: Strategy,

  /// Length of each input in bytes
  #[arg(long, default_value_t = 6)]
  input_bytes: usize,

  /// Number of low bits varied (at most 32)
  #[arg(long, default_value_t = 16)]
  varied_bits: u32,

  /// Worker threads
  #[arg(short = 't', long, default_value_t = 2)]
  threads: usize,
}

impl Cli {
  fn survey_config(&self) -> crcwalk::Result<SurveyConfig> {
    let catalog = self.catalog.unwrap_or_else(|| Config::default().apply_env().catalog);
    let params = catalog.lookup(self.width)?;
    Ok(SurveyConfig {
      strategy: self.strategy,
      input_bytes: self.input_bytes,
      varied_bits: self.varied_bits,
      threads: self.threads,
      ..SurveyConfig::new(params)
    })
  }
}

fn run(cli: &Cli) -> Result<()> {
  let config = cli.survey_config()?;
  info!(
    params = config.params.name,
    strategy = %config.strategy,
    varied_bits = config.varied_bits,
    threads = config.threads,
    "starting survey"
  );
  let report = survey(&config)?;
  println!("{}\n{report}", config.params.name);
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
