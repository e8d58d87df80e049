//! CRC engines.
//!
//! Three interchangeable strategies compute the same checksum for the same
//! parameter set and input. They differ only in how the division is carried
//! out and in how much of each fragment they need the walker to carry:
//!
//! | Strategy | Engine | State | Carry |
//! |----------|--------|-------|-------|
//! | [`Strategy::BitSerial`] | [`BitSerialEngine`] | the fragment window itself | `ceil(degree/8) + 1` bytes |
//! | [`Strategy::Bytewise`] | [`BytewiseEngine`] | top-aligned `u64` register | none |
//! | [`Strategy::Table`] | [`TableEngine`] | top-aligned `u64` register + 256-entry table | none |
//!
//! Every engine is immutable after construction. Per-traversal state lives in
//! the [`CrcRegister`] passed to each update, so one engine may serve any
//! number of traversals, including concurrent ones on separate registers.

mod bitserial;
mod bytewise;
mod table;

pub use bitserial::BitSerialEngine;
pub use bytewise::BytewiseEngine;
pub use table::{LookupTable, TableEngine, init_table};

use crate::{
  error::Result,
  fragment::Fragment,
  params::CrcParameters,
  register::{Checksum, CrcRegister},
};

// ─────────────────────────────────────────────────────────────────────────────
// Engine trait
// ─────────────────────────────────────────────────────────────────────────────

/// A CRC computation strategy bound to one parameter set.
///
/// # Contract
///
/// - The first update on a fresh register applies the initial value.
/// - The update that receives the last fragment finishes the register: output
///   reflection and the final XOR are applied exactly once, and the result is
///   available from [`CrcRegister::checksum`].
/// - Updating a finished register fails with
///   [`CrcError::RegisterFinished`](crate::CrcError::RegisterFinished).
/// - Fragments must come from a walker configured with this engine's
///   [`carry`](Self::carry) width.
pub trait Engine {
  /// The parameter set this engine computes.
  fn params(&self) -> &CrcParameters;

  /// Which strategy this engine implements.
  fn strategy(&self) -> Strategy;

  /// Bytes the walker must carry from the end of one fragment to the start of the next.
  fn carry(&self) -> usize;

  /// Process one fragment.
  fn update(&self, register: &mut CrcRegister, fragment: &mut Fragment<'_>) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy selection
// ─────────────────────────────────────────────────────────────────────────────

/// Engine selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
  /// In-place bit-serial long division over the fragment window.
  #[default]
  BitSerial,
  /// Shift register advanced one byte at a time.
  Bytewise,
  /// 256-entry lookup table.
  Table,
}

impl Strategy {
  /// Every strategy, in selector order (`0`, `1`, `2`).
  pub const ALL: [Self; 3] = [Self::BitSerial, Self::Bytewise, Self::Table];

  /// Stable lowercase name.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::BitSerial => "bitserial",
      Self::Bytewise => "bytewise",
      Self::Table => "table",
    }
  }

  /// Parse a strategy name or numeric selector, ignoring case and surrounding whitespace.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value == "0"
      || value.eq_ignore_ascii_case("bit")
      || value.eq_ignore_ascii_case("bitwise")
      || value.eq_ignore_ascii_case("bitserial")
      || value.eq_ignore_ascii_case("bit-serial")
    {
      return Some(Self::BitSerial);
    }
    if value == "1" || value.eq_ignore_ascii_case("byte") || value.eq_ignore_ascii_case("bytewise") {
      return Some(Self::Bytewise);
    }
    if value == "2" || value.eq_ignore_ascii_case("table") || value.eq_ignore_ascii_case("lut") {
      return Some(Self::Table);
    }
    None
  }
}

impl core::str::FromStr for Strategy {
  type Err = &'static str;

  fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
    Self::parse(s).ok_or("strategy must be one of: 0|bitserial, 1|bytewise, 2|table")
  }
}

impl core::fmt::Display for Strategy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic dispatch by tag
// ─────────────────────────────────────────────────────────────────────────────

/// Any of the three engines, chosen at runtime.
#[derive(Clone, Debug)]
pub enum AnyEngine {
  /// Bit-serial engine.
  BitSerial(BitSerialEngine),
  /// Byte-wise shift register engine.
  Bytewise(BytewiseEngine),
  /// Table-driven engine.
  Table(TableEngine),
}

impl AnyEngine {
  /// Build the engine for `strategy`.
  #[must_use]
  pub fn new(params: CrcParameters, strategy: Strategy) -> Self {
    match strategy {
      Strategy::BitSerial => Self::BitSerial(BitSerialEngine::new(params)),
      Strategy::Bytewise => Self::Bytewise(BytewiseEngine::new(params)),
      Strategy::Table => Self::Table(TableEngine::new(params)),
    }
  }
}

impl Engine for AnyEngine {
  fn params(&self) -> &CrcParameters {
    match self {
      Self::BitSerial(e) => e.params(),
      Self::Bytewise(e) => e.params(),
      Self::Table(e) => e.params(),
    }
  }

  fn strategy(&self) -> Strategy {
    match self {
      Self::BitSerial(e) => e.strategy(),
      Self::Bytewise(e) => e.strategy(),
      Self::Table(e) => e.strategy(),
    }
  }

  fn carry(&self) -> usize {
    match self {
      Self::BitSerial(e) => e.carry(),
      Self::Bytewise(e) => e.carry(),
      Self::Table(e) => e.carry(),
    }
  }

  #[inline]
  fn update(&self, register: &mut CrcRegister, fragment: &mut Fragment<'_>) -> Result<()> {
    match self {
      Self::BitSerial(e) => e.update(register, fragment),
      Self::Bytewise(e) => e.update(register, fragment),
      Self::Table(e) => e.update(register, fragment),
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Top-aligned register helpers (bytewise + table)
// ─────────────────────────────────────────────────────────────────────────────

/// Shift that places a `degree`-bit value in the top bits of a `u64`.
#[inline]
pub(crate) const fn top_shift(params: &CrcParameters) -> u32 {
  64 - params.degree.bits()
}

/// The generator polynomial aligned to bit 63.
#[inline]
pub(crate) const fn top_aligned_poly(params: &CrcParameters) -> u64 {
  params.polynomial << top_shift(params)
}

/// Running register value to continue from, seeding a fresh register with the initial value.
#[inline]
pub(crate) fn resume(params: &CrcParameters, register: &CrcRegister) -> Result<u64> {
  Ok(register.running()?.unwrap_or(params.initial_xor << top_shift(params)))
}

/// Store the register back, finishing it on the last fragment.
#[inline]
pub(crate) fn settle(params: &CrcParameters, register: &mut CrcRegister, value: u64, last: bool) {
  if last {
    let remainder = value >> top_shift(params);
    register.set_finished(Checksum::new(params.degree, params.finish(remainder)));
  } else {
    register.set_running(value);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{CrcError, catalog};

  #[test]
  fn strategy_parse_accepts_names_and_selectors() {
    assert_eq!(Strategy::parse("0"), Some(Strategy::BitSerial));
    assert_eq!(Strategy::parse(" Bitwise "), Some(Strategy::BitSerial));
    assert_eq!(Strategy::parse("1"), Some(Strategy::Bytewise));
    assert_eq!(Strategy::parse("BYTE"), Some(Strategy::Bytewise));
    assert_eq!(Strategy::parse("2"), Some(Strategy::Table));
    assert_eq!(Strategy::parse("lut"), Some(Strategy::Table));
    assert_eq!(Strategy::parse("3"), None);
    assert_eq!(Strategy::parse(""), None);
    assert!("simd".parse::<Strategy>().is_err());
  }

  #[test]
  fn strategy_names_round_trip() {
    for strategy in Strategy::ALL {
      assert_eq!(Strategy::parse(strategy.as_str()), Some(strategy));
    }
  }

  #[test]
  fn any_engine_reports_its_strategy_and_carry() {
    for strategy in Strategy::ALL {
      let engine = AnyEngine::new(catalog::CRC_32, strategy);
      assert_eq!(engine.strategy(), strategy);
      assert_eq!(engine.params(), &catalog::CRC_32);
    }
    assert_eq!(AnyEngine::new(catalog::CRC_32, Strategy::BitSerial).carry(), 5);
    assert_eq!(AnyEngine::new(catalog::CRC_32, Strategy::Bytewise).carry(), 0);
    assert_eq!(AnyEngine::new(catalog::CRC_32, Strategy::Table).carry(), 0);
  }

  #[test]
  fn finished_register_rejects_updates() {
    for strategy in Strategy::ALL {
      let engine = AnyEngine::new(catalog::CRC_16_CCITT_FALSE, strategy);
      let mut register = CrcRegister::new();
      let mut buf = [0x31u8, 0, 0, 0];
      let mut fragment = Fragment::new(&mut buf, 0, 1, true);
      engine.update(&mut register, &mut fragment).unwrap();
      assert!(register.is_finished());

      let mut buf = [0x32u8, 0, 0, 0];
      let mut fragment = Fragment::new(&mut buf, 0, 1, true);
      assert!(matches!(
        engine.update(&mut register, &mut fragment),
        Err(CrcError::RegisterFinished)
      ));
    }
  }
}
