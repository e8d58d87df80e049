//! Bit reflection and width-tagged byte accessors.
//!
//! Reflection reverses bit order: bit 0 swaps with bit `width - 1`, bit 1 with
//! bit `width - 2`, and so on. CRC parameter sets use it in two distinct ways
//! that must not be conflated:
//!
//! | Use | Granularity | Function |
//! |-----|-------------|----------|
//! | Input reflection | each byte independently | [`reflect_bytes`], [`reflect8`] |
//! | Output reflection | the whole register | [`reflect_width`] |
//!
//! Every function here is total and side-effect free (apart from the in-place
//! slice variant), and reflection is an involution: `reflect(reflect(x)) == x`.

/// Reverse the bit order of a byte.
#[inline]
#[must_use]
pub const fn reflect8(value: u8) -> u8 {
  value.reverse_bits()
}

/// Reverse the bit order of a 16-bit word.
#[inline]
#[must_use]
pub const fn reflect16(value: u16) -> u16 {
  value.reverse_bits()
}

/// Reverse the bit order of a 32-bit word.
#[inline]
#[must_use]
pub const fn reflect32(value: u32) -> u32 {
  value.reverse_bits()
}

/// Reverse the bit order of a 64-bit word.
#[inline]
#[must_use]
pub const fn reflect64(value: u64) -> u64 {
  value.reverse_bits()
}

/// Reverse the low `width` bits of `value`.
///
/// Bits above `width` are discarded. For widths of 8, 16, 32 and 64 this
/// agrees with the fixed-width functions; it also covers the 3-bit register.
/// A width of zero yields zero.
#[inline]
#[must_use]
pub const fn reflect_width(value: u64, width: u32) -> u64 {
  if width == 0 {
    return 0;
  }
  let width = if width > 64 { 64 } else { width };
  value.reverse_bits() >> (64 - width)
}

/// Reflect every byte of `bytes` in place.
#[inline]
pub fn reflect_bytes(bytes: &mut [u8]) {
  for byte in bytes {
    *byte = reflect8(*byte);
  }
}

/// Read up to eight bytes as a big-endian integer.
///
/// Only the last eight bytes contribute when more are supplied.
#[inline]
#[must_use]
pub fn load_be(bytes: &[u8]) -> u64 {
  let start = bytes.len().saturating_sub(8);
  bytes
    .iter()
    .skip(start)
    .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Read up to eight bytes as a little-endian integer.
#[inline]
#[must_use]
pub fn load_le(bytes: &[u8]) -> u64 {
  bytes
    .iter()
    .take(8)
    .rev()
    .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Write the low `out.len()` bytes of `value` into `out`, most significant first.
#[inline]
pub fn store_be(value: u64, out: &mut [u8]) {
  let mut v = value;
  for byte in out.iter_mut().rev() {
    *byte = v as u8;
    v >>= 8;
  }
}

/// Write the low `out.len()` bytes of `value` into `out`, least significant first.
#[inline]
pub fn store_le(value: u64, out: &mut [u8]) {
  let mut v = value;
  for byte in out.iter_mut() {
    *byte = v as u8;
    v >>= 8;
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use proptest::prelude::*;

  use super::*;

  #[test]
  fn reflect_known_values() {
    assert_eq!(reflect8(0x80), 0x01);
    assert_eq!(reflect8(0b1100_0000), 0b0000_0011);
    assert_eq!(reflect16(0x1021), 0x8408);
    assert_eq!(reflect32(0x04C1_1DB7), 0xEDB8_8320);
    assert_eq!(reflect64(0x42F0_E1EB_A9EA_3693), 0xC96C_5795_D787_0F42);
  }

  #[test]
  fn reflect_width_matches_fixed_widths() {
    assert_eq!(reflect_width(0x1021, 16), 0x8408);
    assert_eq!(reflect_width(0x04C1_1DB7, 32), 0xEDB8_8320);
    assert_eq!(reflect_width(0x80, 8), 0x01);
  }

  #[test]
  fn reflect_width_three_bits() {
    assert_eq!(reflect_width(0b011, 3), 0b110);
    assert_eq!(reflect_width(0b100, 3), 0b001);
    assert_eq!(reflect_width(0b010, 3), 0b010);
    assert_eq!(reflect_width(0, 0), 0);
  }

  #[test]
  fn reflect_bytes_is_bytewise() {
    let mut buf = [0x01, 0x80, 0x0F];
    reflect_bytes(&mut buf);
    assert_eq!(buf, [0x80, 0x01, 0xF0]);
  }

  #[test]
  fn byte_accessors() {
    assert_eq!(load_be(&[0x04, 0xC1, 0x1D, 0xB7]), 0x04C1_1DB7);
    assert_eq!(load_le(&[0xB7, 0x1D, 0xC1, 0x04]), 0x04C1_1DB7);
    assert_eq!(load_be(&[]), 0);

    let mut out = [0u8; 3];
    store_be(0x0012_3456, &mut out);
    assert_eq!(out, [0x12, 0x34, 0x56]);
    store_le(0x0012_3456, &mut out);
    assert_eq!(out, [0x56, 0x34, 0x12]);
  }

  proptest! {
    #[test]
    fn reflect8_is_involution(x in any::<u8>()) {
      prop_assert_eq!(reflect8(reflect8(x)), x);
    }

    #[test]
    fn reflect16_is_involution(x in any::<u16>()) {
      prop_assert_eq!(reflect16(reflect16(x)), x);
    }

    #[test]
    fn reflect32_is_involution(x in any::<u32>()) {
      prop_assert_eq!(reflect32(reflect32(x)), x);
    }

    #[test]
    fn reflect64_is_involution(x in any::<u64>()) {
      prop_assert_eq!(reflect64(reflect64(x)), x);
    }

    #[test]
    fn reflect_width_is_involution(x in any::<u64>(), width in 1u32..=64) {
      let masked = if width == 64 { x } else { x & ((1u64 << width) - 1) };
      prop_assert_eq!(reflect_width(reflect_width(masked, width), width), masked);
    }
  }
}
