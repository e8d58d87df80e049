//! Polynomial catalog: one parameter set per supported degree.
//!
//! Two tables exist. They agree everywhere except at degree 16, where the
//! even table carries CRC-16/CCITT-FALSE and the odd table CRC-16/KERMIT.
//! Which table is in use is an explicit choice of the caller ([`Catalog`]);
//! neither is treated as more correct.
//!
//! | Degree | Even table | Odd table | Polynomial | Init | RefIn/Out | XorOut | Check |
//! |--------|------------|-----------|------------|------|-----------|--------|-------|
//! | 3 | CRC-3 | CRC-3 | 0x3 | 0x0 | no | 0x0 | 0x3 |
//! | 8 | CRC-8/CCITT | CRC-8/CCITT | 0x07 | 0x00 | no | 0x00 | 0xF4 |
//! | 16 | CRC-16/CCITT-FALSE | CRC-16/KERMIT | 0x1021 | 0xFFFF / 0x0000 | no / yes | 0x0000 | 0x29B1 / 0x2189 |
//! | 32 | CRC-32 | CRC-32 | 0x04C11DB7 | 0xFFFFFFFF | yes | 0xFFFFFFFF | 0xCBF43926 |
//! | 64 | CRC-64/ISO | CRC-64/ISO | 0x1B | 0 | no | 0 | 0xE4FFBEA588933790 |

use crate::{
  error::Result,
  params::{CrcParameters, Degree},
};

/// CRC-3 with generator `x^3 + x + 1`.
pub const CRC_3: CrcParameters = CrcParameters::new("CRC-3", Degree::D3, 0x3, 0x0, 0x0, false, false);

/// CRC-8-CCITT (catalogued as CRC-8/SMBUS).
pub const CRC_8_CCITT: CrcParameters = CrcParameters::new("CRC-8/CCITT", Degree::D8, 0x07, 0x00, 0x00, false, false);

/// CRC-16/CCITT-FALSE (catalogued as CRC-16/IBM-3740).
pub const CRC_16_CCITT_FALSE: CrcParameters =
  CrcParameters::new("CRC-16/CCITT-FALSE", Degree::D16, 0x1021, 0xFFFF, 0x0000, false, false);

/// CRC-16/KERMIT: the reflected CCITT polynomial with a zero initial value.
pub const CRC_16_KERMIT: CrcParameters =
  CrcParameters::new("CRC-16/KERMIT", Degree::D16, 0x1021, 0x0000, 0x0000, true, true);

/// CRC-32 (ISO-HDLC): Ethernet, gzip, PNG, zip.
pub const CRC_32: CrcParameters =
  CrcParameters::new("CRC-32", Degree::D32, 0x04C1_1DB7, 0xFFFF_FFFF, 0xFFFF_FFFF, true, true);

/// CRC-64-ISO generator `x^64 + x^4 + x^3 + x + 1`, unreflected with zero masks.
pub const CRC_64_ISO: CrcParameters = CrcParameters::new("CRC-64/ISO", Degree::D64, 0x1B, 0, 0, false, false);

/// Degree used when a caller has no preference.
pub const DEFAULT_DEGREE: Degree = Degree::D32;

/// Parameter table selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Catalog {
  /// Table whose degree-16 entry is CRC-16/CCITT-FALSE.
  #[default]
  Even,
  /// Table whose degree-16 entry is CRC-16/KERMIT.
  Odd,
}

impl Catalog {
  /// Stable lowercase name.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Even => "even",
      Self::Odd => "odd",
    }
  }

  /// Parameters for a supported degree.
  #[must_use]
  pub const fn get(self, degree: Degree) -> CrcParameters {
    match (self, degree) {
      (_, Degree::D3) => CRC_3,
      (_, Degree::D8) => CRC_8_CCITT,
      (Self::Even, Degree::D16) => CRC_16_CCITT_FALSE,
      (Self::Odd, Degree::D16) => CRC_16_KERMIT,
      (_, Degree::D32) => CRC_32,
      (_, Degree::D64) => CRC_64_ISO,
    }
  }

  /// Parameters for a raw degree value.
  ///
  /// Fails with [`CrcError::UnsupportedDegree`](crate::CrcError::UnsupportedDegree)
  /// outside {3, 8, 16, 32, 64}. No fallback is substituted.
  pub fn lookup(self, degree: u8) -> Result<CrcParameters> {
    Degree::try_from(degree).map(|degree| self.get(degree))
  }

  /// All five parameter sets of this table, ascending by degree.
  #[must_use]
  pub const fn entries(self) -> [CrcParameters; 5] {
    [
      self.get(Degree::D3),
      self.get(Degree::D8),
      self.get(Degree::D16),
      self.get(Degree::D32),
      self.get(Degree::D64),
    ]
  }
}

impl core::str::FromStr for Catalog {
  type Err = &'static str;

  fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("even") || s.eq_ignore_ascii_case("ccitt-false") {
      Ok(Self::Even)
    } else if s.eq_ignore_ascii_case("odd") || s.eq_ignore_ascii_case("kermit") {
      Ok(Self::Odd)
    } else {
      Err("catalog must be one of: even, odd")
    }
  }
}

/// Look a degree up in the default (even) table.
pub fn lookup(degree: u8) -> Result<CrcParameters> {
  Catalog::default().lookup(degree)
}
