//! Known-answer vectors for every catalogued parameter set and every engine.

use crcwalk::{
  Crc, CrcError, CrcParameters, Degree, Encoding, Strategy,
  catalog::{self, Catalog},
};

const CHECK: &[u8] = b"123456789";

/// (parameters, "123456789", bytes 0x00..=0xFF)
const VECTORS: &[(CrcParameters, u64, u64)] = &[
  (catalog::CRC_3, 0x3, 0x5),
  (catalog::CRC_8_CCITT, 0xF4, 0x14),
  (catalog::CRC_16_CCITT_FALSE, 0x29B1, 0x3FBD),
  (catalog::CRC_16_KERMIT, 0x2189, 0xD841),
  (catalog::CRC_32, 0xCBF4_3926, 0x2905_8C73),
  (catalog::CRC_64_ISO, 0xE4FF_BEA5_8893_3790, 0xD5C7_2766_D214_45C9),
];

fn all_bytes() -> Vec<u8> {
  (0..=255u8).collect()
}

#[test]
fn check_and_all_bytes_vectors() {
  let all = all_bytes();
  for &(params, check, over_all) in VECTORS {
    for strategy in Strategy::ALL {
      let crc = Crc::new(params, strategy);
      assert_eq!(crc.checksum(CHECK).unwrap().value(), check, "{} {strategy}", params.name);
      assert_eq!(crc.checksum(&all).unwrap().value(), over_all, "{} {strategy}", params.name);
    }
  }
}

#[test]
fn crc32_check_renders_as_hex() {
  let checksum = Crc::new(catalog::CRC_32, Strategy::BitSerial).checksum(CHECK).unwrap();
  assert_eq!(format!("0x{checksum}"), "0xcbf43926");
  assert_eq!(checksum.as_u32(), Some(0xCBF4_3926));
  assert_eq!(&*checksum.to_bytes(), &[0xCB, 0xF4, 0x39, 0x26]);
}

#[test]
fn ccitt_false_over_single_zero_byte() {
  for strategy in Strategy::ALL {
    let crc = Crc::new(catalog::CRC_16_CCITT_FALSE, strategy);
    assert_eq!(crc.checksum(&[0x00]).unwrap().value(), 0xE1F0, "{strategy}");
  }
}

#[test]
fn crc32_over_single_zero_byte() {
  for strategy in Strategy::ALL {
    let crc = Crc::new(catalog::CRC_32, strategy);
    assert_eq!(crc.checksum(&[0x00]).unwrap().value(), 0xD202_EF8D, "{strategy}");
  }
}

#[test]
fn crc64_iso_over_pangram() {
  for strategy in Strategy::ALL {
    let crc = Crc::new(catalog::CRC_64_ISO, strategy);
    let checksum = crc.checksum(b"The quick brown fox jumps over the lazy dog").unwrap();
    assert_eq!(checksum.value(), 0xCEC1_A8AB_6FFF_9D90, "{strategy}");
  }
}

#[test]
fn empty_input_is_the_documented_value() {
  for params in Catalog::Even.entries().into_iter().chain([catalog::CRC_16_KERMIT]) {
    for strategy in Strategy::ALL {
      let checksum = Crc::new(params, strategy).checksum(&[]).unwrap();
      assert_eq!(checksum.value(), params.empty_checksum(), "{} {strategy}", params.name);
    }
  }
  assert_eq!(catalog::CRC_32.empty_checksum(), 0x0000_0000);
  assert_eq!(catalog::CRC_16_CCITT_FALSE.empty_checksum(), 0xFFFF);
  assert_eq!(catalog::CRC_64_ISO.empty_checksum(), 0);
}

#[test]
fn degree_seven_is_unsupported() {
  assert!(matches!(catalog::lookup(7), Err(CrcError::UnsupportedDegree(7))));
  assert!(matches!(Catalog::Odd.lookup(7), Err(CrcError::UnsupportedDegree(7))));
  assert!(matches!(Degree::try_from(7u8), Err(CrcError::UnsupportedDegree(7))));
}

#[test]
fn poly_tester_field() {
  let crc = Crc::new(catalog::CRC_16_CCITT_FALSE, Strategy::Table);
  let checksum = crc.checksum(&[0x1F, 0x39, 0xC3, 0x56, 0x00, 0x0F]).unwrap();
  assert_eq!(checksum.value(), 0x40FC);
}

#[test]
fn decoded_odd_table_computes_the_same_checksums() {
  let odd_crc32 = CrcParameters::from_coefficients(
    "CRC-32",
    Degree::D32,
    Encoding::Odd,
    &[0x82, 0x60, 0x8E, 0xDB, 0x80],
    &[0xFF, 0xFF, 0xFF, 0xFF],
    &[0xFF, 0xFF, 0xFF, 0xFF],
    true,
    true,
  )
  .unwrap();
  assert_eq!(odd_crc32, catalog::CRC_32);

  let even_ccitt = CrcParameters::from_coefficients(
    "CRC-16/CCITT-FALSE",
    Degree::D16,
    Encoding::Even,
    &[0x21, 0x10],
    &[0xFF, 0xFF],
    &[0x00, 0x00],
    false,
    false,
  )
  .unwrap();
  let crc = Crc::new(even_ccitt, Strategy::BitSerial);
  assert_eq!(crc.checksum(CHECK).unwrap().value(), 0x29B1);
}

#[test]
fn custom_reflected_crc3() {
  // 3-bit register with both reflections and a non-zero mask exercises
  // width-3 output reflection in every engine.
  let params = CrcParameters::new("CRC-3/custom", Degree::D3, 0x3, 0x7, 0x7, true, true);
  let expected = crcwalk::reference::crc_bitwise(&params, CHECK);
  for strategy in Strategy::ALL {
    assert_eq!(Crc::new(params, strategy).checksum(CHECK).unwrap().value(), expected, "{strategy}");
  }
}
