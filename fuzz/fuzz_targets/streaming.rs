//! Fuzz target for walked streams.
//!
//! Arbitrary window sizes must not change the checksum, and a walked stream
//! must agree with the one-shot slice checksum.

#![no_main]

use std::io::Cursor;

use arbitrary::Arbitrary;
use crcwalk::{Crc, Strategy, catalog::Catalog};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Window size beyond the polynomial width.
  extra: u16,
  degree: u8,
  strategy: u8,
  odd: bool,
}

fuzz_target!(|input: Input| {
  let catalog = if input.odd { Catalog::Odd } else { Catalog::Even };
  let Ok(params) = catalog.lookup(input.degree) else {
    return;
  };
  let strategy = Strategy::ALL[usize::from(input.strategy) % Strategy::ALL.len()];
  let crc = Crc::new(params, strategy);
  let chunk_size = params.degree.poly_bytes() + 1 + usize::from(input.extra % 1024);

  let expected = Crc::new(params, Strategy::Table).checksum(&input.data).unwrap();
  let walked = crc.checksum_reader(Cursor::new(&input.data), chunk_size).unwrap();
  assert_eq!(walked, expected, "{} {strategy} chunk {chunk_size}", params.name);
});
