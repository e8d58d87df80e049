//! Bitwise reference implementation of the generalized CRC model.
//!
//! The three engines are checked against this. It processes one message bit
//! at a time, MSB-first, with the register right-aligned in a `u64`:
//!
//! ```text
//! for each bit b of the (optionally reflected) input byte, MSB first:
//!   top = register bit (degree - 1)
//!   register = (register << 1) & mask
//!   if top ^ b: register ^= polynomial
//! ```
//!
//! One bit per iteration; meant for oracles and check values.

// SAFETY: `data[i]` is only read while `i < data.len()`; iterators are not
// available in const fn.
#![allow(clippy::indexing_slicing)]

use crate::{params::CrcParameters, reflect::reflect8};

/// Advance a right-aligned register over `data` without finalizing.
#[must_use]
pub const fn update_bitwise(params: &CrcParameters, mut register: u64, data: &[u8]) -> u64 {
  let mask = params.degree.mask();
  let top_shift = params.degree.bits().strict_sub(1);
  let mut i: usize = 0;
  while i < data.len() {
    let byte = if params.reflect_input { reflect8(data[i]) } else { data[i] };
    let mut bit: u32 = 0;
    while bit < 8 {
      let input = ((byte >> 7u32.strict_sub(bit)) & 1) as u64;
      let top = (register >> top_shift) & 1;
      register = register.strict_shl(1) & mask;
      if top ^ input != 0 {
        register ^= params.polynomial;
      }
      bit = bit.strict_add(1);
    }
    i = i.strict_add(1);
  }
  register
}

/// Compute the finished checksum of `data` bit by bit.
#[must_use]
pub const fn crc_bitwise(params: &CrcParameters, data: &[u8]) -> u64 {
  let register = update_bitwise(params, params.initial_xor, data);
  params.finish(register)
}
