//! In-place bit-serial long division.
//!
//! The fragment window is the dividend. For every message bit that is set,
//! the generator (with its explicit leading term, in the odd encoding) is
//! XORed into the window at that bit's position, clearing it. What is left in
//! the `degree` bits after the message, once the last fragment has been
//! divided into its zero tail, is the remainder.
//!
//! ```text
//! window   │ m0 m1 m2 ... m(len-1) │ 0 0 ... 0 │
//!            ▲                       └── cs + 1 zero tail bytes (last fragment)
//!            └── variant[b] XORed at byte j when bit 7 - b of window[j] is set
//! ```
//!
//! The generator is pre-shifted into eight variants, one per bit position in
//! a byte; each spans `ceil(degree/8) + 1` bytes. A non-last fragment can only
//! be divided up to `len - (ceil(degree/8) + 1)` because later bits still
//! depend on bytes the next fragment brings, so the walker carries those last
//! bytes, already partially reduced, to the front of the next window.

use crate::{
  engine::{Engine, Strategy},
  error::{CrcError, Result},
  fragment::Fragment,
  params::{CrcParameters, Encoding, MAX_POLY_BYTES, odd_aligned},
  reflect::{load_be, reflect_bytes},
  register::{Checksum, CrcRegister},
};

/// Bit-serial engine operating directly on the fragment window.
#[derive(Clone, Debug)]
pub struct BitSerialEngine {
  params: CrcParameters,
  /// Generator shifted right by 0..=7 bits, big-endian, `poly_bytes()` long.
  variants: [[u8; MAX_POLY_BYTES]; 8],
}

impl BitSerialEngine {
  /// Precompute the shifted generator variants for `params`.
  #[must_use]
  pub fn new(params: CrcParameters) -> Self {
    let degree = params.degree;
    let pb = degree.poly_bytes();
    let pattern = odd_aligned(degree, params.polynomial);
    let mut variants = [[0u8; MAX_POLY_BYTES]; 8];
    for (bit, variant) in variants.iter_mut().enumerate() {
      let shifted = pattern >> bit;
      for (i, byte) in variant.iter_mut().take(pb).enumerate() {
        *byte = (shifted >> ((pb - 1 - i) * 8)) as u8;
      }
    }
    Self { params, variants }
  }

  /// Divide every bit of `window[..end]`, reducing into the bytes that follow.
  fn divide(&self, window: &mut [u8], end: usize) {
    let pb = self.params.degree.poly_bytes();
    for j in 0..end {
      let Some(span) = window.get_mut(j..j + pb) else {
        return;
      };
      for (bit, variant) in self.variants.iter().enumerate() {
        let lead = span.first().copied().unwrap_or(0);
        if lead & (0x80 >> bit) != 0 {
          for (dst, src) in span.iter_mut().zip(variant) {
            *dst ^= *src;
          }
        }
      }
    }
  }
}

impl Engine for BitSerialEngine {
  fn params(&self) -> &CrcParameters {
    &self.params
  }

  fn strategy(&self) -> Strategy {
    Strategy::BitSerial
  }

  fn carry(&self) -> usize {
    self.params.degree.poly_bytes()
  }

  fn update(&self, register: &mut CrcRegister, fragment: &mut Fragment<'_>) -> Result<()> {
    let divided = register.running()?;
    let degree = self.params.degree;
    let cs = degree.checksum_bytes();
    let pb = degree.poly_bytes();
    let len = fragment.len();
    let last = fragment.is_last();

    if last && fragment.tail_len() < pb {
      return Err(CrcError::InvalidBufferSize {
        chunk_size: fragment.window().len(),
        min: len + pb,
      });
    }
    if !last && len < pb {
      return Err(CrcError::InvalidBufferSize { chunk_size: len, min: pb });
    }

    if self.params.reflect_input {
      reflect_bytes(fragment.fresh_mut());
    }

    let window = fragment.window_mut();
    if last && let Some(tail) = window.get_mut(len..len + pb) {
      tail.fill(0);
    }
    if divided.is_none() {
      let init = self.params.initial_xor_bytes(Encoding::Odd);
      for (dst, src) in window.iter_mut().zip(init.as_bytes()) {
        *dst ^= *src;
      }
    }

    let end = if last { len } else { len - pb };
    self.divide(window, end);

    if last {
      let tail = window.get(len..len + cs).unwrap_or_default();
      let remainder = load_be(tail) >> (cs as u32 * 8 - degree.bits());
      register.set_finished(Checksum::new(degree, self.params.finish(remainder)));
    } else {
      register.set_running(divided.unwrap_or(0) + end as u64);
    }
    Ok(())
  }
}
