//! The identity decoder for native uncompressed pixel data.

use dcmpress_core::{CompressError, ImageData};

/// Interprets the bytes as a raw little-endian sample buffer with the given
/// geometry.
///
pub fn decode(
  bytes: &[u8],
  width: u16,
  height: u16,
  bits_per_sample: u16,
  samples_per_pixel: u16,
) -> Result<ImageData, CompressError> {
  let photometric_interpretation = if samples_per_pixel == 1 {
    "MONOCHROME2".to_string()
  } else {
    "RGB".to_string()
  };

  ImageData::new(
    width,
    height,
    bits_per_sample,
    samples_per_pixel,
    false,
    photometric_interpretation,
    bytes.to_vec(),
  )
  .map_err(|error| {
    CompressError::new_codec_failure(format!(
      "Native pixel data does not match the image geometry: {}",
      error.details()
    ))
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_validates_length_test() {
    assert!(decode(&[0; 4], 2, 2, 8, 1).is_ok());

    assert!(matches!(
      decode(&[0; 5], 2, 2, 8, 1),
      Err(CompressError::CodecFailure { .. })
    ));
  }
}
