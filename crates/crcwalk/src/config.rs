//! Run configuration for the command-line front ends (defaults + overrides).
//!
//! Engines never consult this module or the environment; a [`Config`] is
//! resolved once by the caller and turned into a [`Crc`](crate::Crc).
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `CRCWALK_STRATEGY` | `0`/`bitserial`, `1`/`bytewise`, `2`/`table` | `bitserial` |
//! | `CRCWALK_CHUNK_SIZE` | bytes, must exceed the carry width | 64 MiB |
//! | `CRCWALK_CATALOG` | `even`, `odd` | `even` |
//!
//! Values are trimmed and matched case-insensitively. Empty or unparsable
//! values are ignored.

use crate::{
  catalog::{Catalog, DEFAULT_DEGREE},
  engine::Strategy,
  error::Result,
  fragment::DEFAULT_CHUNK_SIZE,
  params::CrcParameters,
};

/// Strategy override variable.
pub const ENV_STRATEGY: &str = "CRCWALK_STRATEGY";
/// Chunk size override variable.
pub const ENV_CHUNK_SIZE: &str = "CRCWALK_CHUNK_SIZE";
/// Catalog override variable.
pub const ENV_CATALOG: &str = "CRCWALK_CATALOG";

/// Resolved run configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  /// Requested polynomial degree. Validated by [`params`](Self::params).
  pub degree: u8,
  /// Engine strategy.
  pub strategy: Strategy,
  /// Walker window size in bytes.
  pub chunk_size: usize,
  /// Parameter table.
  pub catalog: Catalog,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      degree: u8::from(DEFAULT_DEGREE),
      strategy: Strategy::default(),
      chunk_size: DEFAULT_CHUNK_SIZE,
      catalog: Catalog::default(),
    }
  }
}

impl Config {
  /// Parameter set for the configured degree and catalog.
  ///
  /// # Errors
  ///
  /// [`CrcError::UnsupportedDegree`](crate::CrcError::UnsupportedDegree).
  pub fn params(&self) -> Result<CrcParameters> {
    self.catalog.lookup(self.degree)
  }

  /// Apply `CRCWALK_*` overrides from the process environment.
  #[cfg(feature = "std")]
  #[must_use]
  pub fn apply_env(self) -> Self {
    self.apply_overrides(|name| std::env::var(name).ok())
  }

  /// Apply overrides from an arbitrary variable source.
  #[cfg(feature = "std")]
  #[must_use]
  pub fn apply_overrides<F>(mut self, lookup: F) -> Self
  where
    F: Fn(&str) -> Option<std::string::String>,
  {
    let read = |name: &str| {
      let value = lookup(name)?;
      let value = value.trim();
      if value.is_empty() { None } else { Some(std::string::String::from(value)) }
    };

    if let Some(strategy) = read(ENV_STRATEGY).and_then(|v| Strategy::parse(&v)) {
      self.strategy = strategy;
    }
    if let Some(chunk_size) = read(ENV_CHUNK_SIZE).and_then(|v| v.parse::<usize>().ok()) {
      self.chunk_size = chunk_size;
    }
    if let Some(catalog) = read(ENV_CATALOG).and_then(|v| v.parse::<Catalog>().ok()) {
      self.catalog = catalog;
    }
    self
  }
}
