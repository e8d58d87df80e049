//! Hamming distance between byte fields and between checksums.

use crate::error::{CrcError, Result};

/// Number of differing bits between two equal-length byte fields.
///
/// # Errors
///
/// [`CrcError::LengthMismatch`] if the fields differ in length.
pub fn distance(a: &[u8], b: &[u8]) -> Result<u32> {
  if a.len() != b.len() {
    return Err(CrcError::LengthMismatch {
      left: a.len(),
      right: b.len(),
    });
  }
  Ok(a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum())
}

/// Number of differing bits between two words.
#[inline]
#[must_use]
pub const fn distance_u64(a: u64, b: u64) -> u32 {
  (a ^ b).count_ones()
}

#[cfg(test)]
mod tests {
  extern crate std;

  use proptest::prelude::*;

  use super::*;

  #[test]
  fn known_distances() {
    assert_eq!(distance(&[], &[]).unwrap(), 0);
    assert_eq!(distance(&[0x00], &[0xFF]).unwrap(), 8);
    assert_eq!(distance(&[0x1F, 0x39], &[0x1F, 0x38]).unwrap(), 1);
    assert_eq!(distance_u64(0b1011, 0b0110), 3);
    assert_eq!(distance_u64(0, u64::MAX), 64);
  }

  #[test]
  fn mismatched_lengths() {
    assert!(matches!(
      distance(&[1, 2, 3], &[1, 2]),
      Err(CrcError::LengthMismatch { left: 3, right: 2 })
    ));
  }

  proptest! {
    #[test]
    fn byte_and_word_distances_agree(a in any::<u64>(), b in any::<u64>()) {
      prop_assert_eq!(distance(&a.to_be_bytes(), &b.to_be_bytes()).unwrap(), distance_u64(a, b));
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self(a in any::<u64>(), b in any::<u64>()) {
      prop_assert_eq!(distance_u64(a, b), distance_u64(b, a));
      prop_assert_eq!(distance_u64(a, a), 0);
    }
  }
}
