//! Decodes a JPEG-LS family bitstream produced by [`crate::encode::jpeg_ls`].

use byteorder::{BigEndian, ByteOrder};

use dcmpress_core::{CompressError, ImageData};

use crate::markers::jpeg_ls;
use crate::med_predictor;
use crate::utils;

/// Decodes a JPEG-LS family bitstream back into image data.
///
/// The marker segments after SOI are walked until the SOS segment, which
/// supplies the NEAR tolerance and marks where the residual payload begins.
/// Stuffed `FF 00` byte pairs are stepped over; other segments are skipped by
/// their declared length.
///
pub fn decode(
  bytes: &[u8],
  width: u16,
  height: u16,
  bits_per_sample: u16,
  samples_per_pixel: u16,
) -> Result<ImageData, CompressError> {
  if samples_per_pixel != 1 {
    return Err(CompressError::new_codec_failure(
      "JPEG-LS decoding supports single-component images only",
    ));
  }

  if !bytes.starts_with(&jpeg_ls::SOI) {
    return Err(CompressError::new_codec_failure(
      "JPEG-LS bitstream does not start with an SOI marker",
    ));
  }

  let mut offset = 2;
  let mut near = 0u8;

  let payload_start = loop {
    if offset + 2 > bytes.len() {
      return Err(CompressError::new_codec_failure(
        "JPEG-LS bitstream ended before the start of scan",
      ));
    }

    if bytes[offset] != 0xFF {
      return Err(CompressError::new_codec_failure(format!(
        "Invalid JPEG-LS marker byte 0x{:02X} at offset {}",
        bytes[offset], offset
      )));
    }

    let code = bytes[offset + 1];

    // A stuffed data byte, not a marker
    if code == 0x00 {
      offset += 2;
      continue;
    }

    if [0xFF, code] == jpeg_ls::EOI {
      return Err(CompressError::new_codec_failure(
        "JPEG-LS bitstream contains no scan",
      ));
    }

    if offset + 4 > bytes.len() {
      return Err(CompressError::new_codec_failure(
        "Truncated JPEG-LS marker segment",
      ));
    }

    let segment_length =
      usize::from(BigEndian::read_u16(&bytes[offset + 2..]));

    if offset + 2 + segment_length > bytes.len() || segment_length < 3 {
      return Err(CompressError::new_codec_failure(
        "Truncated JPEG-LS marker segment",
      ));
    }

    if [0xFF, code] == jpeg_ls::SOS {
      // NEAR sits third from the end of the scan header, before the
      // interleave mode and point transform
      near = bytes[offset + 2 + segment_length - 3];
      break offset + 2 + segment_length;
    }

    offset += 2 + segment_length;
  };

  let payload_end = if bytes.ends_with(&jpeg_ls::EOI) {
    bytes.len() - 2
  } else {
    bytes.len()
  };

  if payload_end < payload_start {
    return Err(CompressError::new_codec_failure(
      "JPEG-LS bitstream has an empty scan",
    ));
  }

  let payload = &bytes[payload_start..payload_end];

  let data = decode_residuals(payload, width, height, bits_per_sample, near)?;

  ImageData::new(
    width,
    height,
    bits_per_sample,
    1,
    false,
    "MONOCHROME2".to_string(),
    data,
  )
}

/// Rebuilds samples by adding each dequantized residual to the MED prediction
/// over the partially reconstructed output, mirroring the encoder exactly.
///
fn decode_residuals(
  payload: &[u8],
  width: u16,
  height: u16,
  bits_per_sample: u16,
  near: u8,
) -> Result<Vec<u8>, CompressError> {
  let width = usize::from(width);
  let height = usize::from(height);
  let bytes_per_sample = usize::from(bits_per_sample).div_ceil(8);

  if payload.len() != width * height * bytes_per_sample {
    return Err(CompressError::new_codec_failure(format!(
      "JPEG-LS payload is {} bytes but {} were expected",
      payload.len(),
      width * height * bytes_per_sample
    )));
  }

  let max_value = if bits_per_sample >= 16 {
    i32::from(u16::MAX)
  } else {
    (1 << bits_per_sample) - 1
  };
  let default_value = med_predictor::default_sample_value(bytes_per_sample);

  if bytes_per_sample == 1 {
    let t = 2 * i32::from(near) + 1;

    let mut reconstructed = vec![0u8; payload.len()];

    for y in 0..height {
      for x in 0..width {
        let prediction =
          med_predictor::predict_at(x, y, default_value, max_value, |x, y| {
            i32::from(reconstructed[y * width + x])
          });

        let error = i32::from(payload[y * width + x] as i8);

        // Wrapping for lossless, clamping for near-lossless, mirroring the
        // encoder's reconstruction exactly
        let value = prediction + error * t;
        reconstructed[y * width + x] = if near == 0 {
          value as u8
        } else {
          value.clamp(0, max_value) as u8
        };
      }
    }

    Ok(reconstructed)
  } else {
    let residuals = utils::read_samples_u16(payload);

    let t = 2 * i32::from(near) * 256 + 1;

    let mut reconstructed = vec![0u16; residuals.len()];

    for y in 0..height {
      for x in 0..width {
        let prediction =
          med_predictor::predict_at(x, y, default_value, max_value, |x, y| {
            i32::from(reconstructed[y * width + x])
          });

        let error = i32::from(residuals[y * width + x] as i16);

        let value = prediction + error * t;
        reconstructed[y * width + x] = if near == 0 {
          value as u16
        } else {
          value.clamp(0, max_value) as u16
        };
      }
    }

    Ok(utils::write_samples_u16(&reconstructed))
  }
}
