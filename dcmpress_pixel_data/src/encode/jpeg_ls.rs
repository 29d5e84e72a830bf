//! Encodes image data into a JPEG-LS family bitstream.
//!
//! The bitstream carries a frame-faithful JPEG-LS header: SOI, an SOF55 frame
//! segment, an LSE preset parameter segment when near-lossless, and an SOS
//! scan segment whose NEAR byte records the error tolerance. The entropy
//! payload is the raw prediction residuals of the median edge detector,
//! quantized when NEAR is non-zero, with no entropy coding.

use dcmpress_core::{
  CompressError, CompressionConfig, CompressionMode, ImageData,
};

use crate::markers::jpeg_ls;
use crate::med_predictor;
use crate::utils;

/// The error tolerance assumed when lossy mode is requested without an
/// explicit near-lossless tolerance.
///
const DEFAULT_LOSSY_NEAR: u8 = 2;

/// Returns the near-lossless tolerance a configuration asks of the JPEG-LS
/// encoder: zero for lossless, the configured tolerance for near-lossless,
/// and a small default for plain lossy mode.
///
pub fn near_tolerance(config: &CompressionConfig) -> u8 {
  match config.mode {
    CompressionMode::Lossless => 0,
    CompressionMode::NearLossless => config.near_lossless,
    CompressionMode::Lossy => {
      if config.near_lossless > 0 {
        config.near_lossless
      } else {
        DEFAULT_LOSSY_NEAR
      }
    }
  }
}

/// Encodes an image into a JPEG-LS family bitstream.
///
pub fn encode(
  image: &ImageData,
  config: &CompressionConfig,
) -> Result<Vec<u8>, CompressError> {
  if image.samples_per_pixel != 1 {
    return Err(CompressError::new_codec_failure(
      "JPEG-LS encoding supports single-component images only",
    ));
  }

  let near = near_tolerance(config);
  let payload = encode_residuals(image, near);

  let mut bytes = Vec::with_capacity(64 + payload.len());

  bytes.extend_from_slice(&jpeg_ls::SOI);
  write_sof55_segment(&mut bytes, image);

  if near > 0 {
    write_lse_segment(&mut bytes);
  }

  write_sos_segment(&mut bytes, image, near);
  bytes.extend_from_slice(&payload);
  bytes.extend_from_slice(&jpeg_ls::EOI);

  Ok(bytes)
}

/// Writes the SOF55 frame segment: sample precision, image dimensions, and
/// one component descriptor per component with no subsampling.
///
fn write_sof55_segment(bytes: &mut Vec<u8>, image: &ImageData) {
  let component_count = image.samples_per_pixel;

  bytes.extend_from_slice(&jpeg_ls::SOF55);
  push_u16(bytes, 8 + 3 * component_count);

  bytes.push(image.bits_per_sample as u8);
  push_u16(bytes, image.height);
  push_u16(bytes, image.width);
  bytes.push(component_count as u8);

  for component in 0..component_count {
    bytes.push(component as u8 + 1);
    bytes.push(0x11);
    bytes.push(0x00);
  }
}

/// Writes the LSE preset parameter segment emitted for near-lossless scans.
///
fn write_lse_segment(bytes: &mut Vec<u8>) {
  bytes.extend_from_slice(&jpeg_ls::LSE);
  push_u16(bytes, 13);

  // ID 1: preset coding parameters
  bytes.push(0x01);

  // MAXVAL, T1, T2, T3, RESET
  push_u16(bytes, 0x00FF);
  push_u16(bytes, 3);
  push_u16(bytes, 7);
  push_u16(bytes, 21);
  push_u16(bytes, 64);
}

/// Writes the SOS scan segment. The NEAR byte is third from the end of the
/// segment, followed by the interleave mode and the point transform.
///
fn write_sos_segment(bytes: &mut Vec<u8>, image: &ImageData, near: u8) {
  let component_count = image.samples_per_pixel;

  bytes.extend_from_slice(&jpeg_ls::SOS);
  push_u16(bytes, 6 + 2 * component_count);

  bytes.push(component_count as u8);

  for component in 0..component_count {
    bytes.push(component as u8 + 1);
    bytes.push(0x00);
  }

  bytes.push(near);
  bytes.push(if component_count > 1 { 2 } else { 0 });
  bytes.push(0x00);
}

/// Computes the MED prediction residual for every sample in row-major order.
///
/// Prediction always runs over the reconstructed samples, so that with a
/// non-zero tolerance the encoder sees exactly what the decoder will see and
/// the per-sample error stays within NEAR. With a tolerance of zero the
/// reconstruction equals the input and the residuals are exact.
///
/// For two-byte samples the tolerance is scaled by 256, keeping the quantizer
/// aligned with the residuals' byte width.
///
fn encode_residuals(image: &ImageData, near: u8) -> Vec<u8> {
  let width = usize::from(image.width);
  let height = usize::from(image.height);
  let max_value = i32::from(image.max_sample_value());
  let default_value =
    med_predictor::default_sample_value(image.bytes_per_sample());

  if image.bytes_per_sample() == 1 {
    let n = i32::from(near);
    let t = 2 * n + 1;

    let mut residuals = Vec::with_capacity(image.data.len());
    let mut reconstructed = vec![0u8; image.data.len()];

    for y in 0..height {
      for x in 0..width {
        let prediction =
          med_predictor::predict_at(x, y, default_value, max_value, |x, y| {
            i32::from(reconstructed[y * width + x])
          });

        let sample = image.data[y * width + x];
        let error = sample.wrapping_sub(prediction as u8) as i8;
        let quantized = (i32::from(error) + n).div_euclid(t);

        residuals.push(quantized as u8);

        // Lossless reconstruction wraps, which makes it an exact inverse of
        // the wrapping residual. Near-lossless reconstruction clamps to the
        // sample range so the NEAR bound holds at the range edges.
        let value = prediction + quantized * t;
        reconstructed[y * width + x] = if near == 0 {
          value as u8
        } else {
          value.clamp(0, max_value) as u8
        };
      }
    }

    residuals
  } else {
    let samples = utils::read_samples_u16(&image.data);

    let n = i32::from(near) * 256;
    let t = 2 * n + 1;

    let mut residuals = Vec::with_capacity(samples.len());
    let mut reconstructed = vec![0u16; samples.len()];

    for y in 0..height {
      for x in 0..width {
        let prediction =
          med_predictor::predict_at(x, y, default_value, max_value, |x, y| {
            i32::from(reconstructed[y * width + x])
          });

        let sample = samples[y * width + x];
        let error = sample.wrapping_sub(prediction as u16) as i16;
        let quantized = (i32::from(error) + n).div_euclid(t);

        residuals.push(quantized as u16);

        let value = prediction + quantized * t;
        reconstructed[y * width + x] = if near == 0 {
          value as u16
        } else {
          value.clamp(0, max_value) as u16
        };
      }
    }

    utils::write_samples_u16(&residuals)
  }
}

fn push_u16(bytes: &mut Vec<u8>, value: u16) {
  bytes.extend_from_slice(&value.to_be_bytes());
}
