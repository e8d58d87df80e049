//! Table-driven engine.
//!
//! `table[i]` is the top-aligned register obtained by shifting the byte `i`
//! (placed in the top byte of an otherwise empty register) through eight
//! bit steps. With the register top-aligned, one step per input byte is:
//!
//! ```text
//! reg = (reg << 8) ^ table[(reg >> 56) ^ byte]
//! ```
//!
//! For degrees of 8 and below `reg << 8` is zero and the table alone carries
//! the state.

// SAFETY: All array indexing in this module uses bounded indices (0..256 loop
// counters, or a `u8` widened to `usize`). Clippy cannot prove this in const fn
// contexts, but bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

use super::bytewise::step;
use crate::{
  engine::{Engine, Strategy, resume, settle, top_aligned_poly, top_shift},
  error::Result,
  fragment::Fragment,
  params::CrcParameters,
  reflect::reflect8,
  register::{Checksum, CrcRegister},
};

/// Build the lookup table for `params`.
///
/// Same as [`LookupTable::new`]; usable in `const` items.
#[must_use]
pub const fn init_table(params: &CrcParameters) -> LookupTable {
  LookupTable::new(params)
}

/// 256 top-aligned entries, one per leading byte.
const fn build_entries(params: &CrcParameters) -> [u64; 256] {
  let poly = top_aligned_poly(params);
  let mut table = [0u64; 256];
  let mut i = 0usize;
  while i < 256 {
    table[i] = step(poly, 0, i as u8);
    i = i.strict_add(1);
  }
  table
}

/// Precomputed per-byte register contributions for one parameter set.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupTable {
  entries: [u64; 256],
}

impl LookupTable {
  /// Compute the table for `params`.
  #[must_use]
  pub const fn new(params: &CrcParameters) -> Self {
    Self {
      entries: build_entries(params),
    }
  }

  /// Entry for a table index.
  #[inline]
  #[must_use]
  pub const fn get(&self, index: u8) -> u64 {
    self.entries[index as usize]
  }

  /// All 256 entries.
  #[inline]
  #[must_use]
  pub const fn entries(&self) -> &[u64; 256] {
    &self.entries
  }
}

impl core::fmt::Debug for LookupTable {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("LookupTable")
      .field("entries[1]", &format_args!("{:#018x}", self.entries[1]))
      .finish_non_exhaustive()
  }
}

/// Table-driven engine.
#[derive(Clone, Debug)]
pub struct TableEngine {
  params: CrcParameters,
  table: LookupTable,
}

impl TableEngine {
  /// Build the table for `params`.
  #[must_use]
  pub const fn new(params: CrcParameters) -> Self {
    Self {
      table: LookupTable::new(&params),
      params,
    }
  }

  /// The lookup table in use.
  #[inline]
  #[must_use]
  pub const fn table(&self) -> &LookupTable {
    &self.table
  }

  #[inline]
  fn fold(&self, register: u64, data: &[u8]) -> u64 {
    let table = &self.table.entries;
    if self.params.reflect_input {
      data
        .iter()
        .fold(register, |reg, &b| (reg << 8) ^ table[((reg >> 56) as u8 ^ reflect8(b)) as usize])
    } else {
      data
        .iter()
        .fold(register, |reg, &b| (reg << 8) ^ table[((reg >> 56) as u8 ^ b) as usize])
    }
  }

  /// Feed `data` into `register`, finishing it when `last` is set.
  pub fn update_slice(&self, register: &mut CrcRegister, data: &[u8], last: bool) -> Result<()> {
    let reg = resume(&self.params, register)?;
    let reg = self.fold(reg, data);
    settle(&self.params, register, reg, last);
    Ok(())
  }

  /// One-shot checksum of an in-memory buffer.
  #[must_use]
  pub fn checksum(&self, data: &[u8]) -> Checksum {
    let shift = top_shift(&self.params);
    let reg = self.fold(self.params.initial_xor << shift, data);
    Checksum::new(self.params.degree, self.params.finish(reg >> shift))
  }
}

impl Engine for TableEngine {
  fn params(&self) -> &CrcParameters {
    &self.params
  }

  fn strategy(&self) -> Strategy {
    Strategy::Table
  }

  fn carry(&self) -> usize {
    0
  }

  #[inline]
  fn update(&self, register: &mut CrcRegister, fragment: &mut Fragment<'_>) -> Result<()> {
    self.update_slice(register, fragment.fresh(), fragment.is_last())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{catalog, engine::BytewiseEngine, reference::crc_bitwise};

  #[test]
  fn known_table_entries() {
    // Unreflected CRC-32 table, top-aligned.
    let table = LookupTable::new(&catalog::CRC_32);
    assert_eq!(table.get(0), 0);
    assert_eq!(table.get(1) >> 32, 0x04C1_1DB7);
    assert_eq!(table.get(255) >> 32, 0xB1F7_40B4);

    let table = LookupTable::new(&catalog::CRC_16_CCITT_FALSE);
    assert_eq!(table.get(1) >> 48, 0x1021);
    assert_eq!(table.get(255) >> 48, 0x1EF0);
  }

  #[test]
  fn entries_have_no_bits_below_the_register() {
    for params in catalog::Catalog::Even.entries() {
      let table = LookupTable::new(&params);
      let below = !(params.degree.mask() << top_shift(&params));
      for entry in table.entries() {
        assert_eq!(entry & below, 0, "{}", params.name);
      }
    }
  }

  #[test]
  fn check_values() {
    for params in catalog::Catalog::Even.entries().into_iter().chain([catalog::CRC_16_KERMIT]) {
      let engine = TableEngine::new(params);
      assert_eq!(engine.checksum(b"123456789").value(), params.check(), "{}", params.name);
    }
  }

  #[test]
  fn agrees_with_bytewise_on_every_byte_value() {
    let all: [u8; 256] = core::array::from_fn(|i| i as u8);
    for params in catalog::Catalog::Odd.entries() {
      let table = TableEngine::new(params);
      let bytewise = BytewiseEngine::new(params);
      assert_eq!(table.checksum(&all), bytewise.checksum(&all), "{}", params.name);
      assert_eq!(table.checksum(&all).value(), crc_bitwise(&params, &all));
    }
  }

  #[test]
  fn reference_values_over_all_bytes() {
    let all: [u8; 256] = core::array::from_fn(|i| i as u8);
    assert_eq!(TableEngine::new(catalog::CRC_3).checksum(&all).value(), 0x5);
    assert_eq!(TableEngine::new(catalog::CRC_8_CCITT).checksum(&all).value(), 0x14);
    assert_eq!(TableEngine::new(catalog::CRC_16_CCITT_FALSE).checksum(&all).value(), 0x3FBD);
    assert_eq!(TableEngine::new(catalog::CRC_16_KERMIT).checksum(&all).value(), 0xD841);
    assert_eq!(TableEngine::new(catalog::CRC_32).checksum(&all).value(), 0x2905_8C73);
    assert_eq!(TableEngine::new(catalog::CRC_64_ISO).checksum(&all).value(), 0xD5C7_2766_D214_45C9);
  }

  #[test]
  fn const_table() {
    const TABLE: LookupTable = init_table(&catalog::CRC_8_CCITT);
    assert_eq!(TABLE.get(1), 0x07 << 56);
    assert_eq!(TABLE, LookupTable::new(&catalog::CRC_8_CCITT));
  }
}
