//! Differential fuzzing against the `crc` crate.
//!
//! Every engine must agree with the external reference for every catalogued
//! parameter set that crate knows, and with the bitwise reference otherwise.

#![no_main]

use crcwalk::{Crc, CrcParameters, Strategy, catalog, reference::crc_bitwise};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  for strategy in Strategy::ALL {
    check(&catalog::CRC_8_CCITT, strategy, data, |d| u64::from(crc::Crc::<u8>::new(&crc::CRC_8_SMBUS).checksum(d)));
    check(&catalog::CRC_16_CCITT_FALSE, strategy, data, |d| {
      u64::from(crc::Crc::<u16>::new(&crc::CRC_16_IBM_3740).checksum(d))
    });
    check(&catalog::CRC_16_KERMIT, strategy, data, |d| {
      u64::from(crc::Crc::<u16>::new(&crc::CRC_16_KERMIT).checksum(d))
    });
    check(&catalog::CRC_32, strategy, data, |d| {
      u64::from(crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC).checksum(d))
    });
    check(&catalog::CRC_3, strategy, data, |d| crc_bitwise(&catalog::CRC_3, d));
    check(&catalog::CRC_64_ISO, strategy, data, |d| crc_bitwise(&catalog::CRC_64_ISO, d));
  }
});

fn check(params: &CrcParameters, strategy: Strategy, data: &[u8], reference: impl Fn(&[u8]) -> u64) {
  let ours = Crc::new(*params, strategy).checksum(data).unwrap().value();
  let expected = reference(data);
  assert_eq!(
    ours,
    expected,
    "{} {strategy} mismatch: ours={ours:#x}, reference={expected:#x}, len={}",
    params.name,
    data.len()
  );
}
