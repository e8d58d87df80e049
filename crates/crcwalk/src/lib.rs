//! Streaming CRC computation over bounded, sliding buffers.
//!
//! A checksum is computed by walking an input in fixed-size windows and feeding
//! each window to one of three interchangeable engines. All engines produce the
//! same result for the same parameter set and input, regardless of window size.
//!
//! # Supported Parameter Sets
//!
//! | Constant | Degree | Polynomial | Check (`"123456789"`) |
//! |----------|--------|------------|-----------------------|
//! | [`catalog::CRC_3`] | 3 | 0x3 | 0x3 |
//! | [`catalog::CRC_8_CCITT`] | 8 | 0x07 | 0xF4 |
//! | [`catalog::CRC_16_CCITT_FALSE`] | 16 | 0x1021 | 0x29B1 |
//! | [`catalog::CRC_16_KERMIT`] | 16 | 0x1021 | 0x2189 |
//! | [`catalog::CRC_32`] | 32 | 0x04C11DB7 | 0xCBF43926 |
//! | [`catalog::CRC_64_ISO`] | 64 | 0x1B | 0xE4FFBEA588933790 |
//!
//! Arbitrary parameter sets of the same degrees can be built with
//! [`CrcParameters::new`] or decoded from coefficient bytes with
//! [`CrcParameters::from_coefficients`].
//!
//! # Engines
//!
//! | [`Strategy`] | Engine | Notes |
//! |--------------|--------|-------|
//! | `BitSerial` | [`BitSerialEngine`] | long division in place on the window; needs a carry between windows |
//! | `Bytewise` | [`BytewiseEngine`] | top-aligned shift register, 8 bit steps per byte |
//! | `Table` | [`TableEngine`] | top-aligned register, one 256-entry lookup per byte |
//!
//! # Example
//!
//! ```rust
//! use crcwalk::{Crc, Strategy, catalog};
//!
//! let crc = Crc::new(catalog::CRC_32, Strategy::BitSerial);
//! assert_eq!(crc.checksum(b"123456789")?.value(), 0xCBF4_3926);
//!
//! // Same result when the input is walked in small windows.
//! let walked = crc.checksum_reader(std::io::Cursor::new(b"123456789"), 6)?;
//! assert_eq!(walked.to_string(), "cbf43926");
//! # Ok::<(), crcwalk::CrcError>(())
//! ```
//!
//! # no_std Support
//!
//! Engines, parameters and the catalog are `no_std`. The slice driver needs
//! `alloc`; the stream walker, file traversal and the survey need `std`:
//!
//! ```toml
//! [dependencies]
//! crcwalk = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod catalog;
#[cfg(feature = "alloc")]
pub mod compute;
pub mod config;
pub mod engine;
mod error;
pub mod fragment;
pub mod hamming;
pub mod params;
pub mod reference;
pub mod reflect;
pub mod register;
#[cfg(feature = "std")]
pub mod survey;
#[cfg(feature = "std")]
pub mod walker;

#[cfg(feature = "alloc")]
pub use compute::Crc;
pub use config::Config;
pub use engine::{AnyEngine, BitSerialEngine, BytewiseEngine, Engine, LookupTable, Strategy, TableEngine, init_table};
pub use error::{CrcError, Result};
pub use fragment::{DEFAULT_CHUNK_SIZE, Fragment};
pub use params::{CrcParameters, Degree, Encoding};
pub use register::{Checksum, CrcRegister};
#[cfg(feature = "std")]
pub use survey::{Survey, SurveyConfig, survey};
#[cfg(feature = "std")]
pub use walker::StreamWalker;
