//! Checksum driver: binds an engine to a walker and runs a traversal.

use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::{
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

#[cfg(feature = "std")]
use crate::walker::StreamWalker;
use crate::{
  engine::{AnyEngine, BitSerialEngine, Engine, Strategy},
  error::{CrcError, Result},
  fragment::Fragment,
  params::CrcParameters,
  register::{Checksum, CrcRegister},
};

/// A parameter set bound to one engine strategy.
///
/// # Example
///
/// ```rust
/// use crcwalk::{Crc, Strategy, catalog};
///
/// let crc = Crc::new(catalog::CRC_32, Strategy::Table);
/// assert_eq!(crc.checksum(b"123456789")?.value(), 0xCBF4_3926);
/// # Ok::<(), crcwalk::CrcError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Crc {
  engine: AnyEngine,
}

impl Crc {
  /// Build the engine for `strategy`.
  #[must_use]
  pub fn new(params: CrcParameters, strategy: Strategy) -> Self {
    Self {
      engine: AnyEngine::new(params, strategy),
    }
  }

  /// The parameter set.
  #[inline]
  #[must_use]
  pub fn params(&self) -> &CrcParameters {
    self.engine.params()
  }

  /// The strategy in use.
  #[inline]
  #[must_use]
  pub fn strategy(&self) -> Strategy {
    self.engine.strategy()
  }

  /// The underlying engine.
  #[inline]
  #[must_use]
  pub const fn engine(&self) -> &AnyEngine {
    &self.engine
  }

  fn empty(&self) -> Checksum {
    let params = self.params();
    Checksum::new(params.degree, params.empty_checksum())
  }

  /// Checksum of an in-memory buffer.
  ///
  /// The register engines read `data` directly. The bit-serial engine divides
  /// in place, so it works on a copy with room for the zero tail.
  ///
  /// # Errors
  ///
  /// [`CrcError::Allocation`] if the bit-serial working copy cannot be allocated.
  pub fn checksum(&self, data: &[u8]) -> Result<Checksum> {
    if data.is_empty() {
      return Ok(self.empty());
    }
    match &self.engine {
      AnyEngine::Bytewise(engine) => Ok(engine.checksum(data)),
      AnyEngine::Table(engine) => Ok(engine.checksum(data)),
      AnyEngine::BitSerial(engine) => checksum_in_place(engine, data),
    }
  }

  /// Checksum of everything `reader` yields, walked in `chunk_size` windows.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidBufferSize`], [`CrcError::Allocation`] or [`CrcError::Io`].
  #[cfg(feature = "std")]
  pub fn checksum_reader<R: BufRead>(&self, reader: R, chunk_size: usize) -> Result<Checksum> {
    self.validate_chunk(chunk_size)?;
    let mut walker = StreamWalker::from_reader(reader, chunk_size, self.engine.carry())?;
    self.walk(&mut walker)
  }

  /// Checksum of a file, walked in `chunk_size` windows.
  ///
  /// A zero-length file yields the parameter set's
  /// [`empty_checksum`](CrcParameters::empty_checksum) without running the engine.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidBufferSize`], [`CrcError::Io`] or [`CrcError::Allocation`].
  #[cfg(feature = "std")]
  pub fn checksum_file(&self, path: impl AsRef<Path>, chunk_size: usize) -> Result<Checksum> {
    let mut walker = self.open(path, chunk_size)?;
    if walker.size() == Some(0) {
      return Ok(self.empty());
    }
    self.walk(&mut walker)
  }

  /// Open a walker sized for this engine.
  ///
  /// # Errors
  ///
  /// [`CrcError::InvalidBufferSize`] when `chunk_size` does not exceed the
  /// polynomial's byte width, otherwise as for [`StreamWalker::open`].
  #[cfg(feature = "std")]
  pub fn open(&self, path: impl AsRef<Path>, chunk_size: usize) -> Result<StreamWalker<BufReader<File>>> {
    self.validate_chunk(chunk_size)?;
    StreamWalker::open(path, chunk_size, self.engine.carry())
  }

  /// Every strategy needs windows wider than `ceil(degree / 8) + 1` bytes,
  /// whether or not it carries bytes between them.
  #[cfg(feature = "std")]
  fn validate_chunk(&self, chunk_size: usize) -> Result<()> {
    let min = self.params().degree.poly_bytes();
    if chunk_size <= min {
      return Err(CrcError::InvalidBufferSize { chunk_size, min });
    }
    Ok(())
  }

  /// Run a traversal over an already opened walker.
  ///
  /// # Errors
  ///
  /// [`CrcError::Io`] from the walker, or an engine error.
  #[cfg(feature = "std")]
  pub fn walk<R: BufRead>(&self, walker: &mut StreamWalker<R>) -> Result<Checksum> {
    self.walk_with(walker, |_, _| {})
  }

  /// Run a traversal, calling `observe` with each fragment's index before it is processed.
  ///
  /// The register is local to the traversal and is dropped on the first error.
  ///
  /// # Errors
  ///
  /// [`CrcError::Io`] from the walker, or an engine error.
  #[cfg(feature = "std")]
  pub fn walk_with<R, F>(&self, walker: &mut StreamWalker<R>, mut observe: F) -> Result<Checksum>
  where
    R: BufRead,
    F: FnMut(u64, &Fragment<'_>),
  {
    let mut register = CrcRegister::new();
    let mut index = 0u64;
    while let Some(mut fragment) = walker.next()? {
      observe(index, &fragment);
      self.engine.update(&mut register, &mut fragment)?;
      index += 1;
    }
    Ok(register.checksum().unwrap_or_else(|| self.empty()))
  }
}

/// Run the bit-serial engine over a private copy of `data` as a single last fragment.
fn checksum_in_place(engine: &BitSerialEngine, data: &[u8]) -> Result<Checksum> {
  let bytes = data.len().saturating_add(engine.carry());
  let mut window = Vec::new();
  window
    .try_reserve_exact(bytes)
    .map_err(|_| CrcError::Allocation { bytes })?;
  window.extend_from_slice(data);
  window.resize(bytes, 0);

  let mut register = CrcRegister::new();
  let mut fragment = Fragment::new(&mut window, 0, data.len(), true);
  engine.update(&mut register, &mut fragment)?;
  register.checksum().ok_or(CrcError::RegisterFinished)
}

#[cfg(test)]
mod tests {
  extern crate std;

  use super::*;
  use crate::catalog;

  #[test]
  fn every_strategy_matches_check_values() {
    for strategy in Strategy::ALL {
      for params in catalog::Catalog::Even.entries() {
        let crc = Crc::new(params, strategy);
        assert_eq!(
          crc.checksum(b"123456789").unwrap().value(),
          params.check(),
          "{} {strategy}",
          params.name
        );
      }
    }
  }

  #[test]
  fn empty_input_short_circuits() {
    for strategy in Strategy::ALL {
      assert_eq!(Crc::new(catalog::CRC_32, strategy).checksum(&[]).unwrap().value(), 0);
      assert_eq!(
        Crc::new(catalog::CRC_16_CCITT_FALSE, strategy).checksum(&[]).unwrap().value(),
        0xFFFF
      );
    }
  }

  #[cfg(feature = "std")]
  #[test]
  fn reader_matches_slice_for_small_windows() {
    use std::io::Cursor;

    let data: std::vec::Vec<u8> = (0..1000u32).map(|i| (i * 7 + 3) as u8).collect();
    for strategy in Strategy::ALL {
      let crc = Crc::new(catalog::CRC_64_ISO, strategy);
      let expected = crc.checksum(&data).unwrap();
      for chunk in [10usize, 11, 64, 999, 1000, 4096] {
        let got = crc.checksum_reader(Cursor::new(&data), chunk).unwrap();
        assert_eq!(got, expected, "{strategy} chunk {chunk}");
      }
    }
  }

  #[cfg(feature = "std")]
  #[test]
  fn walk_with_observes_each_fragment() {
    use std::{io::Cursor, vec::Vec};

    let crc = Crc::new(catalog::CRC_32, Strategy::BitSerial);
    let mut walker = StreamWalker::from_reader(Cursor::new(&b"123456789"[..]), 6, crc.engine().carry()).unwrap();
    let mut seen = Vec::new();
    let checksum = crc
      .walk_with(&mut walker, |index, fragment| seen.push((index, fragment.carried(), fragment.is_last())))
      .unwrap();
    assert_eq!(checksum.value(), 0xCBF4_3926);
    // The peek after byte 9 finds EOF, so the fourth fragment is the last.
    assert_eq!(seen, [(0, 0, false), (1, 5, false), (2, 5, false), (3, 5, true)]);
  }

  #[cfg(feature = "std")]
  #[test]
  fn reader_rejects_small_chunks() {
    use std::io::Cursor;

    let crc = Crc::new(catalog::CRC_32, Strategy::BitSerial);
    assert!(matches!(
      crc.checksum_reader(Cursor::new(&b"abc"[..]), 5),
      Err(CrcError::InvalidBufferSize { chunk_size: 5, min: 5 })
    ));
    let crc = Crc::new(catalog::CRC_32, Strategy::Table);
    assert!(matches!(
      crc.checksum_reader(Cursor::new(&b"123456789"[..]), 1),
      Err(CrcError::InvalidBufferSize { chunk_size: 1, min: 5 })
    ));
  }

  #[cfg(feature = "std")]
  #[test]
  fn every_strategy_rejects_chunks_within_the_polynomial_width() {
    use std::io::Cursor;

    for strategy in Strategy::ALL {
      let crc = Crc::new(catalog::CRC_64_ISO, strategy);
      for chunk_size in [0usize, 1, 4, 9] {
        assert!(
          matches!(
            crc.checksum_reader(Cursor::new(&b"123456789"[..]), chunk_size),
            Err(CrcError::InvalidBufferSize { min: 9, .. })
          ),
          "{strategy} chunk {chunk_size}"
        );
      }
      let checksum = crc.checksum_reader(Cursor::new(&b"123456789"[..]), 10).unwrap();
      assert_eq!(checksum.value(), 0xE4FF_BEA5_8893_3790, "{strategy}");

      // Rejected before the path is touched.
      let err = crc.checksum_file("/nonexistent/crcwalk", 4).unwrap_err();
      assert!(matches!(err, CrcError::InvalidBufferSize { chunk_size: 4, min: 9 }), "{strategy}");
    }
  }
}
