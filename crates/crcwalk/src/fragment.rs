//! One window of a traversal, as handed from a walker to an engine.
//!
//! ```text
//!   0          carried                len                window.len()
//!   ├──────────┼──────────────────────┼──────────────────────┤
//!   │  carry   │     fresh input      │  zero tail (last)    │
//!   └──────────┴──────────────────────┴──────────────────────┘
//! ```
//!
//! The carry holds bytes the previous update left behind for the engine (the
//! bit-serial engine's partially divided tail). Only `window[carried..len]` is
//! new input. On the last fragment the window extends past `len` by at least
//! `ceil(degree / 8) + 1` zeroed bytes, which the bit-serial engine divides
//! into and reads the remainder from. Register engines ignore both the carry
//! and the tail.

/// Default window size for file traversal (64 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// A mutable view of one fragment of a stream.
#[derive(Debug)]
pub struct Fragment<'a> {
  window: &'a mut [u8],
  carried: usize,
  len: usize,
  last: bool,
}

impl<'a> Fragment<'a> {
  /// Wrap a window. `len` is clamped to the window and `carried` to `len`.
  #[must_use]
  pub fn new(window: &'a mut [u8], carried: usize, len: usize, last: bool) -> Self {
    let len = len.min(window.len());
    let carried = carried.min(len);
    Self {
      window,
      carried,
      len,
      last,
    }
  }

  /// Number of bytes at the front of the window carried over from the previous fragment.
  #[inline]
  #[must_use]
  pub const fn carried(&self) -> usize {
    self.carried
  }

  /// End of the input data within the window (carry plus fresh bytes).
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// True when the window holds no input bytes at all.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// True for the fragment that reaches the end of the stream.
  #[inline]
  #[must_use]
  pub const fn is_last(&self) -> bool {
    self.last
  }

  /// The inverse of [`is_last`](Self::is_last).
  #[inline]
  #[must_use]
  pub const fn more_fragments(&self) -> bool {
    !self.last
  }

  /// Number of tail bytes beyond `len`.
  #[inline]
  #[must_use]
  pub fn tail_len(&self) -> usize {
    self.window.len() - self.len
  }

  /// Fresh input bytes of this fragment.
  #[inline]
  #[must_use]
  pub fn fresh(&self) -> &[u8] {
    self.window.get(self.carried..self.len).unwrap_or_default()
  }

  /// Fresh input bytes, mutable.
  #[inline]
  pub fn fresh_mut(&mut self) -> &mut [u8] {
    self.window.get_mut(self.carried..self.len).unwrap_or_default()
  }

  /// The whole window, including carry and tail.
  #[inline]
  #[must_use]
  pub fn window(&self) -> &[u8] {
    self.window
  }

  /// The whole window, mutable.
  #[inline]
  pub fn window_mut(&mut self) -> &mut [u8] {
    self.window
  }
}
