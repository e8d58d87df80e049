//! Checksum distribution survey.
//!
//! Enumerates every value of the low `varied_bits` bits of a fixed input field
//! and records how the resulting checksums spread over the checksum space.
//! The range is partitioned across worker threads. Each worker owns its own
//! engine and a local histogram, and merges into one shared accumulator when
//! it is done, so the only cross-thread state is behind a single mutex.

use std::{
  collections::BTreeMap,
  fmt,
  sync::{Mutex, PoisonError},
  thread,
  vec::Vec,
};

use crate::{
  compute::Crc,
  engine::Strategy,
  error::{CrcError, Result},
  hamming::distance_u64,
  params::CrcParameters,
  register::Checksum,
};

/// Seed for the surveyed field. Fields longer than this repeat it.
pub const BASE_PATTERN: [u8; 6] = [0x1F, 0x39, 0xC3, 0x56, 0x00, 0x0F];

/// Upper bound on `varied_bits`.
pub const MAX_VARIED_BITS: u32 = 32;

/// What to survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurveyConfig {
  /// Parameter set under test.
  pub params: CrcParameters,
  /// Engine each worker uses.
  pub strategy: Strategy,
  /// Length of the input field in bytes.
  pub input_bytes: usize,
  /// Number of low-order bits of the field that are enumerated.
  pub varied_bits: u32,
  /// Worker thread count.
  pub threads: usize,
}

impl SurveyConfig {
  /// A six-byte field with its low 16 bits varied over two workers.
  #[must_use]
  pub const fn new(params: CrcParameters) -> Self {
    Self {
      params,
      strategy: Strategy::Table,
      input_bytes: BASE_PATTERN.len(),
      varied_bits: 16,
      threads: 2,
    }
  }

  fn validate(&self) -> Result<()> {
    if self.threads == 0 {
      return Err(CrcError::InvalidSurvey("at least one thread is required"));
    }
    if self.varied_bits > MAX_VARIED_BITS {
      return Err(CrcError::InvalidSurvey("at most 32 bits can be varied"));
    }
    if u64::from(self.varied_bits) > (self.input_bytes as u64).saturating_mul(8) {
      return Err(CrcError::InvalidSurvey("varied bits exceed the input field"));
    }
    Ok(())
  }

  /// The field for counter value `counter`: the base pattern with its low
  /// `varied_bits` bits replaced by the counter.
  fn field(&self, counter: u64, out: &mut [u8]) {
    for (i, byte) in out.iter_mut().enumerate() {
      *byte = BASE_PATTERN.get(i % BASE_PATTERN.len()).copied().unwrap_or(0);
    }
    let mut remaining = self.varied_bits;
    let mut value = counter;
    for byte in out.iter_mut().rev() {
      if remaining == 0 {
        break;
      }
      let bits = remaining.min(8);
      let mask = ((1u16 << bits) - 1) as u8;
      *byte = (*byte & !mask) | (value as u8 & mask);
      value >>= 8;
      remaining -= bits;
    }
  }
}

/// Distribution summary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Survey {
  /// Checksum of the unmodified base field.
  pub base_checksum: Checksum,
  /// Number of inputs checksummed.
  pub inputs: u64,
  /// Number of distinct checksum values produced.
  pub distinct: u64,
  /// Largest number of inputs that mapped to one checksum value.
  pub max_bucket: u64,
  /// Inputs whose checksum had already been produced by another input.
  pub collisions: u64,
  /// Mean Hamming distance between checksums of consecutive counter values.
  pub mean_neighbor_distance: f64,
}

impl fmt::Display for Survey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "base checksum:          0x{}", self.base_checksum)?;
    writeln!(f, "inputs:                 {}", self.inputs)?;
    writeln!(f, "distinct checksums:     {}", self.distinct)?;
    writeln!(f, "largest bucket:         {}", self.max_bucket)?;
    writeln!(f, "collisions:             {}", self.collisions)?;
    write!(f, "mean neighbor distance: {:.3}", self.mean_neighbor_distance)
  }
}

#[derive(Default)]
struct Accumulator {
  histogram: BTreeMap<u64, u64>,
  inputs: u64,
  distance_sum: u64,
  pairs: u64,
}

impl Accumulator {
  fn merge(&mut self, other: Self) {
    for (value, count) in other.histogram {
      *self.histogram.entry(value).or_insert(0) += count;
    }
    self.inputs += other.inputs;
    self.distance_sum += other.distance_sum;
    self.pairs += other.pairs;
  }
}

/// Checksum every counter value in `start..end`.
///
/// The pair `(start - 1, start)` is counted here so the neighbor mean does not
/// depend on how the range is partitioned.
fn work(config: &SurveyConfig, start: u64, end: u64) -> Result<Accumulator> {
  let crc = Crc::new(config.params, config.strategy);
  let mut field = Vec::new();
  field
    .try_reserve_exact(config.input_bytes)
    .map_err(|_| CrcError::Allocation {
      bytes: config.input_bytes,
    })?;
  field.resize(config.input_bytes, 0);

  let mut acc = Accumulator::default();
  let mut previous = match start.checked_sub(1) {
    Some(before) => {
      config.field(before, &mut field);
      Some(crc.checksum(&field)?.value())
    }
    None => None,
  };
  for counter in start..end {
    config.field(counter, &mut field);
    let value = crc.checksum(&field)?.value();
    *acc.histogram.entry(value).or_insert(0) += 1;
    acc.inputs += 1;
    if let Some(prev) = previous {
      acc.distance_sum += u64::from(distance_u64(prev, value));
      acc.pairs += 1;
    }
    previous = Some(value);
  }
  Ok(acc)
}

/// Run a survey.
///
/// # Errors
///
/// [`CrcError::InvalidSurvey`] for an out-of-range configuration, or any
/// error raised by a worker's engine.
pub fn survey(config: &SurveyConfig) -> Result<Survey> {
  config.validate()?;

  let total = 1u64 << config.varied_bits;
  let workers = (config.threads as u64).min(total).max(1);
  let span = total.div_ceil(workers);

  let shared = Mutex::new(Accumulator::default());
  let outcomes: Vec<Result<()>> = thread::scope(|scope| {
    let handles: Vec<_> = (0..workers)
      .map(|w| {
        let start = w * span;
        let end = (start + span).min(total);
        let shared = &shared;
        scope.spawn(move || -> Result<()> {
          let local = work(config, start, end)?;
          shared.lock().unwrap_or_else(PoisonError::into_inner).merge(local);
          Ok(())
        })
      })
      .collect();
    handles
      .into_iter()
      .map(|handle| {
        handle
          .join()
          .unwrap_or(Err(CrcError::InvalidSurvey("survey worker panicked")))
      })
      .collect()
  });
  for outcome in outcomes {
    outcome?;
  }

  let acc = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
  let base_checksum = Crc::new(config.params, config.strategy).checksum(&base_field(config.input_bytes))?;
  let distinct = acc.histogram.len() as u64;
  let max_bucket = acc.histogram.values().copied().max().unwrap_or(0);
  let mean_neighbor_distance = if acc.pairs == 0 {
    0.0
  } else {
    acc.distance_sum as f64 / acc.pairs as f64
  };

  Ok(Survey {
    base_checksum,
    inputs: acc.inputs,
    distinct,
    max_bucket,
    collisions: acc.inputs - distinct,
    mean_neighbor_distance,
  })
}

fn base_field(len: usize) -> Vec<u8> {
  BASE_PATTERN.iter().copied().cycle().take(len).collect()
}
