//! Decodes a JPEG 2000 family codestream produced by
//! [`crate::encode::jpeg_2000`].

use byteorder::{BigEndian, ByteOrder};

use dcmpress_core::{CompressError, ImageData};

use crate::markers::j2k;
use crate::utils;

/// Decodes a JPEG 2000 family codestream back into image data.
///
/// The main header is walked to find the start of data: the SIZ segment is
/// cross-checked against the expected dimensions and supplies the component
/// signedness, and the COD segment's transform byte selects the reversible or
/// irreversible payload decoding.
///
pub fn decode(
  bytes: &[u8],
  width: u16,
  height: u16,
  bits_per_sample: u16,
  samples_per_pixel: u16,
) -> Result<ImageData, CompressError> {
  if !bytes.starts_with(&j2k::SOC) {
    return Err(CompressError::new_codec_failure(
      "JPEG 2000 codestream does not start with an SOC marker",
    ));
  }

  let mut offset = 2;
  let mut is_reversible = None;
  let mut is_signed = false;

  let payload_start = loop {
    if offset + 2 > bytes.len() {
      return Err(CompressError::new_codec_failure(
        "JPEG 2000 codestream ended before the start of data",
      ));
    }

    if bytes[offset] != 0xFF {
      return Err(CompressError::new_codec_failure(format!(
        "Invalid JPEG 2000 marker byte 0x{:02X} at offset {}",
        bytes[offset], offset
      )));
    }

    let marker = [0xFF, bytes[offset + 1]];

    if marker == j2k::SOD {
      break offset + 2;
    }

    if marker == j2k::EOC {
      return Err(CompressError::new_codec_failure(
        "JPEG 2000 codestream contains no tile data",
      ));
    }

    if offset + 4 > bytes.len() {
      return Err(CompressError::new_codec_failure(
        "Truncated JPEG 2000 marker segment",
      ));
    }

    let segment_length =
      usize::from(BigEndian::read_u16(&bytes[offset + 2..]));
    let segment = bytes
      .get(offset + 2..offset + 2 + segment_length)
      .ok_or_else(|| {
        CompressError::new_codec_failure("Truncated JPEG 2000 marker segment")
      })?;

    if marker == j2k::SIZ && segment.len() > 38 {
      let siz_width = BigEndian::read_u32(&segment[4..]);
      let siz_height = BigEndian::read_u32(&segment[8..]);

      if siz_width != u32::from(width) || siz_height != u32::from(height) {
        return Err(CompressError::new_codec_failure(format!(
          "Codestream dimensions {siz_width}x{siz_height} do not match the \
           expected {width}x{height}"
        )));
      }

      is_signed = segment[38] & 0x80 != 0;
    }

    if marker == j2k::COD && segment.len() > 11 {
      is_reversible = Some(segment[11] == 1);
    }

    offset += 2 + segment_length;
  };

  let Some(is_reversible) = is_reversible else {
    return Err(CompressError::new_codec_failure(
      "JPEG 2000 codestream has no COD segment",
    ));
  };

  let payload_end = if bytes.ends_with(&j2k::EOC) {
    bytes.len() - 2
  } else {
    bytes.len()
  };

  if payload_end < payload_start {
    return Err(CompressError::new_codec_failure(
      "JPEG 2000 codestream has an empty tile",
    ));
  }

  let payload = &bytes[payload_start..payload_end];

  let bytes_per_sample = usize::from(bits_per_sample).div_ceil(8);
  let sample_count =
    usize::from(width) * usize::from(height) * usize::from(samples_per_pixel);

  let data = if is_reversible {
    decode_reversible_payload(payload, sample_count, bytes_per_sample)?
  } else {
    decode_irreversible_payload(payload, sample_count, bytes_per_sample)?
  };

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
    is_signed,
    photometric_interpretation,
    data,
  )
}

/// Inverts the horizontal differential encoding with a wrapping running sum.
///
fn decode_reversible_payload(
  payload: &[u8],
  sample_count: usize,
  bytes_per_sample: usize,
) -> Result<Vec<u8>, CompressError> {
  if payload.len() != sample_count * bytes_per_sample {
    return Err(CompressError::new_codec_failure(format!(
      "Reversible payload is {} bytes but {} were expected",
      payload.len(),
      sample_count * bytes_per_sample
    )));
  }

  if bytes_per_sample == 1 {
    let mut data = Vec::with_capacity(payload.len());

    let mut previous = 0u8;
    for &delta in payload.iter() {
      previous = previous.wrapping_add(delta);
      data.push(previous);
    }

    Ok(data)
  } else {
    let deltas = utils::read_samples_u16(payload);
    let mut samples = Vec::with_capacity(deltas.len());

    let mut previous = 0u16;
    for &delta in deltas.iter() {
      previous = previous.wrapping_add(delta);
      samples.push(previous);
    }

    Ok(utils::write_samples_u16(&samples))
  }
}

/// Inverts the shift quantization by left-shifting every sample by the
/// exponent carried in the payload's first byte. The low bits lost on encode
/// stay zero.
///
fn decode_irreversible_payload(
  payload: &[u8],
  sample_count: usize,
  bytes_per_sample: usize,
) -> Result<Vec<u8>, CompressError> {
  let Some((&shift, quantized)) = payload.split_first() else {
    return Err(CompressError::new_codec_failure(
      "Irreversible payload is empty",
    ));
  };

  if usize::from(shift) >= bytes_per_sample * 8 {
    return Err(CompressError::new_codec_failure(format!(
      "Invalid quantization shift {shift}"
    )));
  }

  if quantized.len() != sample_count * bytes_per_sample {
    return Err(CompressError::new_codec_failure(format!(
      "Irreversible payload is {} bytes but {} were expected",
      quantized.len(),
      sample_count * bytes_per_sample
    )));
  }

  if bytes_per_sample == 1 {
    Ok(quantized.iter().map(|sample| sample << shift).collect())
  } else {
    let samples: Vec<u16> = utils::read_samples_u16(quantized)
      .iter()
      .map(|sample| sample << shift)
      .collect();

    Ok(utils::write_samples_u16(&samples))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_missing_soc_test() {
    assert!(matches!(
      decode(&[0x00, 0x11], 2, 2, 8, 1),
      Err(CompressError::CodecFailure { .. })
    ));
  }

  #[test]
  fn rejects_codestream_without_tile_data_test() {
    let bytes = [0xFF, 0x4F, 0xFF, 0xD9];

    assert!(matches!(
      decode(&bytes, 2, 2, 8, 1),
      Err(CompressError::CodecFailure { .. })
    ));
  }
}
