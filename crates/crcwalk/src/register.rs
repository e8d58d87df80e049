//! Running register state and the finished checksum value.
//!
//! A [`CrcRegister`] belongs to exactly one traversal. It starts fresh, is
//! seeded with the initial value on the first update, and is finished by the
//! update that carries the last fragment. It is never reset mid-stream; a new
//! traversal starts from a new register.

use core::{fmt, ops::Deref};

use crate::{
  error::{CrcError, Result},
  params::Degree,
};

// ─────────────────────────────────────────────────────────────────────────────
// Register
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum State {
  #[default]
  Fresh,
  Running(u64),
  Finished(Checksum),
}

/// Per-traversal accumulator passed explicitly to every engine update.
///
/// The running value's layout is private to the engine that owns the
/// traversal; only the finished [`Checksum`] is observable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CrcRegister {
  state: State,
}

impl CrcRegister {
  /// A register that has not seen any input.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { state: State::Fresh }
  }

  /// True until the first update. The first update applies the initial value.
  #[inline]
  #[must_use]
  pub const fn is_fresh(&self) -> bool {
    matches!(self.state, State::Fresh)
  }

  /// True once the last fragment has been processed.
  #[inline]
  #[must_use]
  pub const fn is_finished(&self) -> bool {
    matches!(self.state, State::Finished(_))
  }

  /// The finished checksum, if the traversal is complete.
  #[inline]
  #[must_use]
  pub const fn checksum(&self) -> Option<Checksum> {
    match self.state {
      State::Finished(checksum) => Some(checksum),
      _ => None,
    }
  }

  /// Current running value, `None` when fresh.
  pub(crate) fn running(&self) -> Result<Option<u64>> {
    match self.state {
      State::Fresh => Ok(None),
      State::Running(value) => Ok(Some(value)),
      State::Finished(_) => Err(CrcError::RegisterFinished),
    }
  }

  pub(crate) fn set_running(&mut self, value: u64) {
    self.state = State::Running(value);
  }

  pub(crate) fn set_finished(&mut self, checksum: Checksum) {
    self.state = State::Finished(checksum);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Checksum
// ─────────────────────────────────────────────────────────────────────────────

/// A finished checksum: final XOR and output reflection already applied.
///
/// Rendered as `2 * ceil(degree / 8)` lowercase hex digits, most significant
/// first. For reflected parameter sets this is the fully reflected register,
/// which is the same digit sequence as printing the byte-reflected remainder
/// in reverse byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checksum {
  degree: Degree,
  value: u64,
}

impl Checksum {
  /// Wrap a value, masking it to the degree.
  #[inline]
  #[must_use]
  pub const fn new(degree: Degree, value: u64) -> Self {
    Self {
      degree,
      value: value & degree.mask(),
    }
  }

  /// Degree the checksum was computed for.
  #[inline]
  #[must_use]
  pub const fn degree(&self) -> Degree {
    self.degree
  }

  /// The checksum right-aligned in a `u64`.
  #[inline]
  #[must_use]
  pub const fn value(&self) -> u64 {
    self.value
  }

  /// The value as `u8`, when the degree fits.
  #[inline]
  #[must_use]
  pub const fn as_u8(&self) -> Option<u8> {
    if self.degree.bits() <= 8 { Some(self.value as u8) } else { None }
  }

  /// The value as `u16`, when the degree fits.
  #[inline]
  #[must_use]
  pub const fn as_u16(&self) -> Option<u16> {
    if self.degree.bits() <= 16 { Some(self.value as u16) } else { None }
  }

  /// The value as `u32`, when the degree fits.
  #[inline]
  #[must_use]
  pub const fn as_u32(&self) -> Option<u32> {
    if self.degree.bits() <= 32 { Some(self.value as u32) } else { None }
  }

  /// The value as `u64`.
  #[inline]
  #[must_use]
  pub const fn as_u64(&self) -> u64 {
    self.value
  }

  /// Big-endian bytes, `ceil(degree / 8)` long.
  #[must_use]
  pub fn to_bytes(&self) -> ChecksumBytes {
    let len = self.degree.checksum_bytes();
    let all = self.value.to_be_bytes();
    let mut bytes = [0u8; 8];
    for (dst, src) in bytes.iter_mut().zip(all.iter().skip(8 - len)) {
      *dst = *src;
    }
    ChecksumBytes { bytes, len: len as u8 }
  }

  fn hex_digits(&self) -> usize {
    self.degree.checksum_bytes() * 2
  }
}

impl fmt::Display for Checksum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:0width$x}", self.value, width = self.hex_digits())
  }
}

impl fmt::LowerHex for Checksum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.write_str("0x")?;
    }
    write!(f, "{:0width$x}", self.value, width = self.hex_digits())
  }
}

impl fmt::UpperHex for Checksum {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
      f.write_str("0x")?;
    }
    write!(f, "{:0width$X}", self.value, width = self.hex_digits())
  }
}

/// Inline big-endian checksum bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChecksumBytes {
  bytes: [u8; 8],
  len: u8,
}

impl Deref for ChecksumBytes {
  type Target = [u8];

  fn deref(&self) -> &[u8] {
    self.bytes.get(..usize::from(self.len)).unwrap_or_default()
  }
}

impl AsRef<[u8]> for ChecksumBytes {
  fn as_ref(&self) -> &[u8] {
    self
  }
}
