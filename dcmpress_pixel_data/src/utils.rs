//! Helpers for moving between sample slices and little-endian byte buffers.

use byteorder::{ByteOrder, LittleEndian};

/// Reads a little-endian byte buffer as 16-bit samples.
///
pub fn read_samples_u16(bytes: &[u8]) -> Vec<u16> {
  let mut samples = vec![0u16; bytes.len() / 2];
  LittleEndian::read_u16_into(bytes, &mut samples);

  samples
}

/// Writes 16-bit samples to a little-endian byte buffer.
///
pub fn write_samples_u16(samples: &[u16]) -> Vec<u8> {
  let mut bytes = vec![0u8; samples.len() * 2];
  LittleEndian::write_u16_into(samples, &mut bytes);

  bytes
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sample_conversion_round_trips() {
    let samples = vec![0u16, 1, 255, 256, 0xFFFF];
    let bytes = write_samples_u16(&samples);

    assert_eq!(bytes, vec![0, 0, 1, 0, 255, 0, 0, 1, 255, 255]);
    assert_eq!(read_samples_u16(&bytes), samples);
  }
}
