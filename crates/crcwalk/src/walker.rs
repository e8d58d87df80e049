//! Fixed-size window walker over a byte stream.
//!
//! The walker owns one buffer of `chunk_size + carry` bytes and hands it out
//! one [`Fragment`] at a time. Each window is filled completely unless the
//! stream ends first. Before refilling, the last `carry` bytes of the
//! previous window (as the engine left them) are moved to the front, so an
//! engine that needs look-ahead sees a contiguous dividend across fragment
//! boundaries.
//!
//! End of stream is detected by peeking after a full read, so `last` is set on
//! exactly the fragment that reaches EOF, even when the stream length is a
//! multiple of the window size. The last fragment is followed by `carry`
//! zeroed bytes.
//!
//! ```text
//! next #1   │ f f f f f f f f │                 fresh = chunk_size
//! next #2   │ c c │ f f f f f f │               carry moved, fresh = chunk_size - carry
//! next #n   │ c c │ f f f │ 0 0 │               last, followed by a zero tail
//! ```

use std::{
  fs::File,
  io::{self, BufRead, BufReader, Read},
  path::Path,
  vec::Vec,
};

use crate::{
  error::{CrcError, Result},
  fragment::Fragment,
};

/// Walks a stream in fixed-size windows with a carry between them.
#[derive(Debug)]
pub struct StreamWalker<R> {
  reader: Option<R>,
  buf: Vec<u8>,
  chunk_size: usize,
  carry: usize,
  size: Option<u64>,
  position: u64,
  fragments: u64,
  /// End of the previous window's data, when its carry has not been moved yet.
  pending: Option<usize>,
  exhausted: bool,
}

impl StreamWalker<BufReader<File>> {
  /// Open a file for walking.
  ///
  /// The file's size is read up front and reported by [`size`](Self::size).
  ///
  /// # Errors
  ///
  /// - [`CrcError::InvalidBufferSize`] if `chunk_size <= carry` (checked before any I/O).
  /// - [`CrcError::Io`] if the file cannot be inspected or opened.
  /// - [`CrcError::Allocation`] if the window cannot be reserved.
  pub fn open(path: impl AsRef<Path>, chunk_size: usize, carry: usize) -> Result<Self> {
    validate(chunk_size, carry)?;
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    let file = File::open(path)?;
    let mut walker = Self::from_reader(BufReader::new(file), chunk_size, carry)?;
    walker.size = Some(size);
    Ok(walker)
  }
}

impl<R: BufRead> StreamWalker<R> {
  /// Walk an arbitrary buffered reader. The total size is unknown.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidBufferSize`] or [`CrcError::Allocation`], as for
  /// [`open`](StreamWalker::open).
  pub fn from_reader(reader: R, chunk_size: usize, carry: usize) -> Result<Self> {
    validate(chunk_size, carry)?;
    let bytes = chunk_size.checked_add(carry).ok_or(CrcError::Allocation { bytes: usize::MAX })?;
    let mut buf = Vec::new();
    buf
      .try_reserve_exact(bytes)
      .map_err(|_| CrcError::Allocation { bytes })?;
    buf.resize(bytes, 0);
    Ok(Self {
      reader: Some(reader),
      buf,
      chunk_size,
      carry,
      size: None,
      position: 0,
      fragments: 0,
      pending: None,
      exhausted: false,
    })
  }

  /// Produce the next fragment, or `None` once the stream is exhausted.
  ///
  /// An empty stream yields `None` on the first call. After an error the
  /// walker is exhausted and releases its reader and buffer.
  ///
  /// # Errors
  ///
  /// [`CrcError::Io`] if reading fails.
  pub fn next(&mut self) -> Result<Option<Fragment<'_>>> {
    if self.exhausted {
      self.release();
      return Ok(None);
    }
    let Some(reader) = self.reader.as_mut() else {
      return Ok(None);
    };

    let carried = match self.pending.take() {
      Some(end) => {
        self.buf.copy_within(end - self.carry..end, 0);
        self.carry
      }
      None => 0,
    };

    let room = self.chunk_size - carried;
    let read = self
      .buf
      .get_mut(carried..self.chunk_size)
      .map_or(Ok(0), |window| fill(reader, window))
      .and_then(|filled| {
        if filled < room {
          return Ok((filled, true));
        }
        reader.fill_buf().map(|peek| (filled, peek.is_empty()))
      });
    let (filled, last) = match read {
      Ok(read) => read,
      Err(err) => {
        self.release();
        return Err(err.into());
      }
    };

    let len = carried + filled;
    if self.fragments == 0 && len == 0 {
      self.release();
      return Ok(None);
    }

    self.position += filled as u64;
    self.fragments += 1;
    let end = if last {
      self.reader = None;
      self.exhausted = true;
      if let Some(tail) = self.buf.get_mut(len..len + self.carry) {
        tail.fill(0);
      }
      len + self.carry
    } else {
      self.pending = Some(len);
      len
    };

    let window = self.buf.get_mut(..end).unwrap_or_default();
    Ok(Some(Fragment::new(window, carried, len, last)))
  }

  /// Total stream size in bytes, when known.
  #[inline]
  #[must_use]
  pub const fn size(&self) -> Option<u64> {
    self.size
  }

  /// Input bytes consumed so far.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> u64 {
    self.position
  }

  /// Fragments produced so far.
  #[inline]
  #[must_use]
  pub const fn fragments(&self) -> u64 {
    self.fragments
  }

  /// Window size in bytes (carry included).
  #[inline]
  #[must_use]
  pub const fn chunk_size(&self) -> usize {
    self.chunk_size
  }

  /// Carry width in bytes.
  #[inline]
  #[must_use]
  pub const fn carry(&self) -> usize {
    self.carry
  }

  /// True once the last fragment has been produced or an error occurred.
  #[inline]
  #[must_use]
  pub const fn is_exhausted(&self) -> bool {
    self.exhausted
  }

  fn release(&mut self) {
    self.reader = None;
    self.exhausted = true;
    self.pending = None;
    self.buf = Vec::new();
  }
}

fn validate(chunk_size: usize, carry: usize) -> Result<()> {
  if chunk_size <= carry {
    return Err(CrcError::InvalidBufferSize {
      chunk_size,
      min: carry,
    });
  }
  Ok(())
}

/// Read until `buf` is full or the reader reports end of stream.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
  let mut filled = 0;
  while let Some(rest) = buf.get_mut(filled..) {
    if rest.is_empty() {
      break;
    }
    match reader.read(rest) {
      Ok(0) => break,
      Ok(n) => filled += n,
      Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
      Err(err) => return Err(err),
    }
  }
  Ok(filled)
}
