//! Error types for CRC computation and stream walking.
//!
//! Every fallible operation in this crate returns [`CrcError`]. The library
//! never logs, retries, or terminates the process; reporting belongs to the
//! caller.

use thiserror::Error;

/// Errors surfaced by the CRC engines, the catalog, and the stream walker.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CrcError {
  /// The polynomial degree is not one of 3, 8, 16, 32, 64.
  #[error("unsupported polynomial degree {0} (expected one of 3, 8, 16, 32, 64)")]
  UnsupportedDegree(u8),

  /// Open, stat or read failure. Fatal to the current traversal.
  #[cfg(feature = "std")]
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The working buffer could not be allocated.
  #[error("failed to allocate {bytes} bytes of workspace memory")]
  Allocation {
    /// Requested size in bytes.
    bytes: usize,
  },

  /// The chunk size does not exceed the polynomial's carry width.
  #[error("chunk size {chunk_size} must be greater than the polynomial size ({min} bytes)")]
  InvalidBufferSize {
    /// Requested chunk size in bytes.
    chunk_size: usize,
    /// Carry width the chunk must exceed.
    min: usize,
  },

  /// A coefficient byte sequence does not describe a polynomial of the given degree.
  #[error("invalid coefficients for degree {degree}: {reason}")]
  InvalidCoefficients {
    /// Degree the bytes were decoded for.
    degree: u8,
    /// What was wrong with them.
    reason: &'static str,
  },

  /// An update was issued after the final fragment was processed.
  #[error("register already finished; start a new traversal")]
  RegisterFinished,

  /// Two byte fields that must have equal length do not.
  #[error("length mismatch: {left} != {right}")]
  LengthMismatch {
    /// Length of the first field.
    left: usize,
    /// Length of the second field.
    right: usize,
  },

  /// A survey configuration is outside the supported range.
  #[error("invalid survey configuration: {0}")]
  InvalidSurvey(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CrcError>;
