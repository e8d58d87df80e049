//! CRC algorithm parameters.
//!
//! A parameter set follows the generalized (Rocksoft) CRC model used by the
//! [CRC Catalogue](https://reveng.sourceforge.io/crc-catalogue/):
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `degree` | Register width in bits (3, 8, 16, 32 or 64) |
//! | `polynomial` | Generator coefficients, MSB-first, implicit `x^degree` term omitted |
//! | `initial_xor` | Value the register starts from |
//! | `final_xor` | Mask XORed into the finished remainder |
//! | `reflect_input` | Reflect every input byte before division |
//! | `reflect_output` | Reflect the whole register after the final XOR |
//!
//! # Coefficient Encodings
//!
//! Parameter tables exist in two byte encodings, and both are supported
//! explicitly through [`Encoding`]:
//!
//! | Encoding | Bytes | Layout | CRC-32 example |
//! |----------|-------|--------|----------------|
//! | [`Encoding::Even`] | `ceil(degree/8)` | little-endian, leading term omitted | `B7 1D C1 04` |
//! | [`Encoding::Odd`] | `ceil(degree/8) + 1` | big-endian, leading term in bit 7 of byte 0 | `82 60 8E DB 80` |
//!
//! The odd form is what the bit-serial engine XORs into its window; the even
//! form is the conventional register representation. XOR masks follow the same
//! split: even masks are little-endian, odd masks are big-endian and
//! left-aligned so they can be XORed directly onto leading message bytes.

use core::fmt;

use crate::{
  error::{CrcError, Result},
  reference,
  reflect::{load_be, load_le, reflect_width, store_be, store_le},
};

/// Largest encoded coefficient length (odd encoding of a degree-64 polynomial).
pub const MAX_POLY_BYTES: usize = 9;

// ─────────────────────────────────────────────────────────────────────────────
// Degree
// ─────────────────────────────────────────────────────────────────────────────

/// Supported polynomial degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Degree {
  /// 3-bit CRC.
  D3 = 3,
  /// 8-bit CRC.
  D8 = 8,
  /// 16-bit CRC.
  D16 = 16,
  /// 32-bit CRC.
  D32 = 32,
  /// 64-bit CRC.
  D64 = 64,
}

impl Degree {
  /// Every supported degree, ascending.
  pub const ALL: [Self; 5] = [Self::D3, Self::D8, Self::D16, Self::D32, Self::D64];

  /// Register width in bits.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u32 {
    self as u32
  }

  /// Width of the finished checksum in bytes: `ceil(degree / 8)`.
  #[inline]
  #[must_use]
  pub const fn checksum_bytes(self) -> usize {
    (self as usize).div_ceil(8)
  }

  /// Width of the odd coefficient encoding, which is also the carry width
  /// the stream walker keeps between fragments.
  #[inline]
  #[must_use]
  pub const fn poly_bytes(self) -> usize {
    self.checksum_bytes() + 1
  }

  /// Mask covering the low `degree` bits.
  #[inline]
  #[must_use]
  pub const fn mask(self) -> u64 {
    match self {
      Self::D64 => u64::MAX,
      other => (1u64 << other.bits()) - 1,
    }
  }
}

impl TryFrom<u8> for Degree {
  type Error = CrcError;

  fn try_from(value: u8) -> Result<Self> {
    match value {
      3 => Ok(Self::D3),
      8 => Ok(Self::D8),
      16 => Ok(Self::D16),
      32 => Ok(Self::D32),
      64 => Ok(Self::D64),
      other => Err(CrcError::UnsupportedDegree(other)),
    }
  }
}

impl From<Degree> for u8 {
  #[inline]
  fn from(degree: Degree) -> Self {
    degree as u8
  }
}

impl fmt::Display for Degree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", *self as u8)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoded byte sequences
// ─────────────────────────────────────────────────────────────────────────────

/// Byte encoding of coefficients and XOR masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
  /// Explicit leading term, one extra byte, big-endian and left-aligned.
  Odd,
  /// Implicit leading term, little-endian and right-aligned.
  #[default]
  Even,
}

impl Encoding {
  /// Stable lowercase name.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Odd => "odd",
      Self::Even => "even",
    }
  }
}

/// A short inline byte sequence produced by [`CrcParameters`] encoders.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedBytes {
  bytes: [u8; MAX_POLY_BYTES],
  len: u8,
  encoding: Encoding,
}

impl EncodedBytes {
  fn new(len: usize, encoding: Encoding) -> Self {
    Self {
      bytes: [0u8; MAX_POLY_BYTES],
      len: len.min(MAX_POLY_BYTES) as u8,
      encoding,
    }
  }

  fn as_mut_bytes(&mut self) -> &mut [u8] {
    let len = usize::from(self.len);
    self.bytes.get_mut(..len).unwrap_or_default()
  }

  /// The encoded bytes.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    self.bytes.get(..usize::from(self.len)).unwrap_or_default()
  }

  /// Encoding the bytes were produced in.
  #[inline]
  #[must_use]
  pub const fn encoding(&self) -> Encoding {
    self.encoding
  }

  /// Number of encoded bytes.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len as usize
  }

  /// True when no bytes are encoded.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }
}

impl fmt::Debug for EncodedBytes {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}[", self.encoding.as_str())?;
    for (i, b) in self.as_bytes().iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      write!(f, "{b:02X}")?;
    }
    f.write_str("]")
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameter set
// ─────────────────────────────────────────────────────────────────────────────

/// A complete CRC parameter set.
///
/// Numeric fields are right-aligned and masked to `degree` bits. Instances are
/// immutable values: engines borrow them for the duration of a computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CrcParameters {
  /// Human-readable catalog name.
  pub name: &'static str,
  /// Register width.
  pub degree: Degree,
  /// Generator coefficients without the implicit leading term.
  pub polynomial: u64,
  /// Initial register value.
  pub initial_xor: u64,
  /// Final XOR mask.
  pub final_xor: u64,
  /// Reflect each input byte before processing.
  pub reflect_input: bool,
  /// Reflect the register over its full width after the final XOR.
  pub reflect_output: bool,
}

impl CrcParameters {
  /// Build a parameter set, masking numeric fields to the degree.
  #[must_use]
  pub const fn new(
    name: &'static str,
    degree: Degree,
    polynomial: u64,
    initial_xor: u64,
    final_xor: u64,
    reflect_input: bool,
    reflect_output: bool,
  ) -> Self {
    let mask = degree.mask();
    Self {
      name,
      degree,
      polynomial: polynomial & mask,
      initial_xor: initial_xor & mask,
      final_xor: final_xor & mask,
      reflect_input,
      reflect_output,
    }
  }

  /// Decode a parameter set from encoded byte sequences.
  ///
  /// `coefficients` must be in `encoding`; the XOR masks must use the same
  /// encoding's mask layout (`ceil(degree / 8)` bytes in both cases).
  #[allow(clippy::too_many_arguments)]
  pub fn from_coefficients(
    name: &'static str,
    degree: Degree,
    encoding: Encoding,
    coefficients: &[u8],
    initial_xor: &[u8],
    final_xor: &[u8],
    reflect_input: bool,
    reflect_output: bool,
  ) -> Result<Self> {
    let polynomial = decode_polynomial(degree, encoding, coefficients)?;
    let initial_xor = decode_mask(degree, encoding, initial_xor)?;
    let final_xor = decode_mask(degree, encoding, final_xor)?;
    Ok(Self::new(
      name,
      degree,
      polynomial,
      initial_xor,
      final_xor,
      reflect_input,
      reflect_output,
    ))
  }

  /// Encode the generator coefficients.
  #[must_use]
  pub fn coefficients(&self, encoding: Encoding) -> EncodedBytes {
    match encoding {
      Encoding::Even => encode_mask(self.degree, Encoding::Even, self.polynomial),
      Encoding::Odd => {
        let len = self.degree.poly_bytes();
        let mut out = EncodedBytes::new(len, Encoding::Odd);
        let aligned = odd_aligned(self.degree, self.polynomial);
        for (i, byte) in out.as_mut_bytes().iter_mut().enumerate() {
          let shift = (len - 1 - i) * 8;
          *byte = (aligned >> shift) as u8;
        }
        out
      }
    }
  }

  /// Encode the initial XOR value.
  #[must_use]
  pub fn initial_xor_bytes(&self, encoding: Encoding) -> EncodedBytes {
    encode_mask(self.degree, encoding, self.initial_xor)
  }

  /// Encode the final XOR mask.
  #[must_use]
  pub fn final_xor_bytes(&self, encoding: Encoding) -> EncodedBytes {
    encode_mask(self.degree, encoding, self.final_xor)
  }

  /// Checksum of a zero-length input.
  ///
  /// The initial value XORed with `final_xor`, then reflected over the
  /// register width when `reflect_output` is set. The stream driver returns this without running an
  /// engine; every engine produces the same value for an empty slice.
  #[inline]
  #[must_use]
  pub const fn empty_checksum(&self) -> u64 {
    self.finish(self.initial_xor)
  }

  /// Apply the final XOR to a raw remainder, then output reflection.
  ///
  /// The mask is XORed into the unreflected remainder, so an asymmetric
  /// `final_xor` ends up reflected along with it.
  #[inline]
  #[must_use]
  pub const fn finish(&self, remainder: u64) -> u64 {
    let masked = (remainder ^ self.final_xor) & self.degree.mask();
    if self.reflect_output {
      reflect_width(masked, self.degree.bits())
    } else {
      masked
    }
  }

  /// Checksum of the ASCII string `"123456789"`.
  #[must_use]
  pub fn check(&self) -> u64 {
    reference::crc_bitwise(self, b"123456789")
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Number of zero padding bits below the odd pattern's lowest coefficient.
const fn odd_padding(degree: Degree) -> u32 {
  (degree.poly_bytes() as u32) * 8 - (degree.bits() + 1)
}

/// The `degree + 1` bit generator, left-aligned in `poly_bytes()` bytes.
pub(crate) const fn odd_aligned(degree: Degree, polynomial: u64) -> u128 {
  let full = (1u128 << degree.bits()) | (polynomial & degree.mask()) as u128;
  full << odd_padding(degree)
}

fn encode_mask(degree: Degree, encoding: Encoding, value: u64) -> EncodedBytes {
  let len = degree.checksum_bytes();
  let mut out = EncodedBytes::new(len, encoding);
  let value = value & degree.mask();
  match encoding {
    Encoding::Even => store_le(value, out.as_mut_bytes()),
    Encoding::Odd => {
      let pad = (len as u32) * 8 - degree.bits();
      store_be(value << pad, out.as_mut_bytes());
    }
  }
  out
}

fn decode_mask(degree: Degree, encoding: Encoding, bytes: &[u8]) -> Result<u64> {
  let invalid = |reason| CrcError::InvalidCoefficients {
    degree: degree.into(),
    reason,
  };
  if bytes.len() != degree.checksum_bytes() {
    return Err(invalid("xor mask must be ceil(degree / 8) bytes"));
  }
  match encoding {
    Encoding::Even => {
      let value = load_le(bytes);
      if value & !degree.mask() != 0 {
        return Err(invalid("xor mask has bits above the degree"));
      }
      Ok(value)
    }
    Encoding::Odd => {
      let pad = (bytes.len() as u32) * 8 - degree.bits();
      let value = load_be(bytes);
      if pad > 0 && value & ((1u64 << pad) - 1) != 0 {
        return Err(invalid("xor mask has bits in the padding"));
      }
      Ok(value >> pad)
    }
  }
}

fn decode_polynomial(degree: Degree, encoding: Encoding, bytes: &[u8]) -> Result<u64> {
  let invalid = |reason| CrcError::InvalidCoefficients {
    degree: degree.into(),
    reason,
  };
  match encoding {
    Encoding::Even => {
      if bytes.len() != degree.checksum_bytes() {
        return Err(invalid("even coefficients must be ceil(degree / 8) bytes"));
      }
      let value = load_le(bytes);
      if value & !degree.mask() != 0 {
        return Err(invalid("coefficients exceed the degree"));
      }
      Ok(value)
    }
    Encoding::Odd => {
      if bytes.len() != degree.poly_bytes() {
        return Err(invalid("odd coefficients must be ceil(degree / 8) + 1 bytes"));
      }
      let value = bytes.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b));
      let pad = odd_padding(degree);
      if value & ((1u128 << pad) - 1) != 0 {
        return Err(invalid("odd coefficients have bits in the padding"));
      }
      let full = value >> pad;
      if full >> degree.bits() != 1 {
        return Err(invalid("odd coefficients must carry the explicit leading term"));
      }
      Ok((full as u64) & degree.mask())
    }
  }
}
