//! Byte-at-a-time shift register.
//!
//! The register is kept top-aligned in a `u64` (bit `degree - 1` at bit 63).
//! Each input byte is XORed into the top byte and shifted out one bit at a
//! time, folding the generator back in whenever a set bit leaves the top.
//! Top alignment lets every degree, including the 3-bit one, share a single
//! update loop.

use crate::{
  engine::{Engine, Strategy, resume, settle, top_aligned_poly, top_shift},
  error::Result,
  fragment::Fragment,
  params::CrcParameters,
  reflect::reflect8,
  register::{Checksum, CrcRegister},
};

/// Advance a top-aligned register by one byte.
#[inline]
pub(crate) const fn step(poly: u64, register: u64, byte: u8) -> u64 {
  let mut reg = register ^ (byte as u64).strict_shl(56);
  let mut bit = 0u32;
  while bit < 8 {
    let shifted = reg.strict_shl(1);
    reg = if reg & (1 << 63) != 0 { shifted ^ poly } else { shifted };
    bit = bit.strict_add(1);
  }
  reg
}

/// Shift register engine with an inner 8-bit loop.
#[derive(Clone, Debug)]
pub struct BytewiseEngine {
  params: CrcParameters,
  poly: u64,
}

impl BytewiseEngine {
  /// Bind the engine to a parameter set.
  #[must_use]
  pub const fn new(params: CrcParameters) -> Self {
    Self {
      poly: top_aligned_poly(&params),
      params,
    }
  }

  fn fold(&self, register: u64, data: &[u8]) -> u64 {
    let reflect = self.params.reflect_input;
    data.iter().fold(register, |reg, &byte| {
      let byte = if reflect { reflect8(byte) } else { byte };
      step(self.poly, reg, byte)
    })
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

impl Engine for BytewiseEngine {
  fn params(&self) -> &CrcParameters {
    &self.params
  }

  fn strategy(&self) -> Strategy {
    Strategy::Bytewise
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
  use crate::{catalog, reference::crc_bitwise};

  #[test]
  fn check_values() {
    for params in catalog::Catalog::Even.entries().into_iter().chain([catalog::CRC_16_KERMIT]) {
      let engine = BytewiseEngine::new(params);
      assert_eq!(engine.checksum(b"123456789").value(), params.check(), "{}", params.name);
    }
  }

  #[test]
  fn step_shifts_out_the_top_bit() {
    const POLY: u64 = 0x07_u64 << 56;
    const ONE: u64 = step(POLY, 0, 0x01);
    const TOP: u64 = step(POLY, 0, 0x80);
    assert_eq!(ONE, POLY);
    assert_eq!(TOP, 0x89_u64 << 56);
    assert_eq!(step(POLY, 0, 0x00), 0);
  }

  #[test]
  fn crc64_iso_vectors() {
    let engine = BytewiseEngine::new(catalog::CRC_64_ISO);
    assert_eq!(engine.checksum(b"123456789").value(), 0xE4FF_BEA5_8893_3790);
    assert_eq!(
      engine.checksum(b"The quick brown fox jumps over the lazy dog").value(),
      0xCEC1_A8AB_6FFF_9D90
    );
  }

  #[test]
  fn three_bit_register() {
    let engine = BytewiseEngine::new(catalog::CRC_3);
    let all: [u8; 256] = core::array::from_fn(|i| i as u8);
    assert_eq!(engine.checksum(&all).value(), 0x5);
    assert_eq!(engine.checksum(&[0x00]).value(), 0);
  }

  #[test]
  fn incremental_matches_oneshot() {
    let data = b"The quick brown fox jumps over the lazy dog";
    for params in catalog::Catalog::Odd.entries() {
      let engine = BytewiseEngine::new(params);
      for split in 0..=data.len() {
        let (a, b) = data.split_at(split);
        let mut register = CrcRegister::new();
        engine.update_slice(&mut register, a, false).unwrap();
        engine.update_slice(&mut register, b, true).unwrap();
        assert_eq!(register.checksum().unwrap().value(), crc_bitwise(&params, data));
      }
    }
  }

  #[test]
  fn empty_slice_yields_empty_checksum() {
    for params in catalog::Catalog::Even.entries() {
      let mut register = CrcRegister::new();
      BytewiseEngine::new(params).update_slice(&mut register, &[], true).unwrap();
      assert_eq!(register.checksum().unwrap().value(), params.empty_checksum());
    }
  }

  #[test]
  fn leaves_fragment_untouched() {
    let engine = BytewiseEngine::new(catalog::CRC_32);
    let mut buf = *b"123456789";
    let mut fragment = Fragment::new(&mut buf, 0, 9, true);
    let mut register = CrcRegister::new();
    engine.update(&mut register, &mut fragment).unwrap();
    assert_eq!(&buf, b"123456789");
    assert_eq!(register.checksum().unwrap().value(), 0xCBF4_3926);
  }
}
