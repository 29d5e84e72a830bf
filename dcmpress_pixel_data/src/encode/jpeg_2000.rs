//! Encodes image data into a JPEG 2000 family codestream.
//!
//! The codestream's main header is frame-faithful: SOC, SIZ, COD, and QCD
//! marker segments with legal parameter values, a single whole-image tile
//! introduced by SOT/SOD, and a closing EOC. The tile payload is either a
//! reversible horizontal differential encoding of the samples or, for lossy
//! encoding, the samples uniformly right-shifted by a quantization exponent
//! derived from the target compression ratio.

use dcmpress_core::{
  CompressError, CompressionConfig, CompressionMode, ImageData,
};

use crate::markers::j2k;
use crate::utils;

/// The target compression ratio assumed for lossy encoding when neither the
/// configuration nor its quality preset supplies one.
///
const FALLBACK_TARGET_RATIO: f64 = 20.0;

/// Encodes an image into a JPEG 2000 family codestream, reversible when the
/// mode is lossless and irreversible otherwise.
///
pub fn encode(
  image: &ImageData,
  config: &CompressionConfig,
) -> Result<Vec<u8>, CompressError> {
  let is_reversible = config.mode == CompressionMode::Lossless;

  let payload = if is_reversible {
    encode_reversible_payload(image)
  } else {
    encode_irreversible_payload(image, config)
  };

  let component_count = usize::from(image.samples_per_pixel);

  let mut bytes = Vec::with_capacity(64 + 3 * component_count + payload.len());

  bytes.extend_from_slice(&j2k::SOC);
  write_siz_segment(&mut bytes, image);
  write_cod_segment(&mut bytes, config, is_reversible);
  write_qcd_segment(&mut bytes, is_reversible);
  write_sot_segment(&mut bytes, payload.len());
  bytes.extend_from_slice(&j2k::SOD);
  bytes.extend_from_slice(&payload);
  bytes.extend_from_slice(&j2k::EOC);

  Ok(bytes)
}

/// Writes the SIZ marker segment describing the image and tile geometry. The
/// image occupies a single tile at the grid origin.
///
fn write_siz_segment(bytes: &mut Vec<u8>, image: &ImageData) {
  let component_count = image.samples_per_pixel;

  bytes.extend_from_slice(&j2k::SIZ);
  push_u16(bytes, 38 + 3 * component_count);

  // Rsiz: no profile restrictions
  push_u16(bytes, 0);

  push_u32(bytes, u32::from(image.width));
  push_u32(bytes, u32::from(image.height));
  push_u32(bytes, 0);
  push_u32(bytes, 0);

  // One tile covering the whole image
  push_u32(bytes, u32::from(image.width));
  push_u32(bytes, u32::from(image.height));
  push_u32(bytes, 0);
  push_u32(bytes, 0);

  push_u16(bytes, component_count);

  let sign_bit = if image.is_signed { 0x80u8 } else { 0 };
  let ssiz = sign_bit | ((image.bits_per_sample - 1) & 0x7F) as u8;

  for _ in 0..component_count {
    bytes.push(ssiz);
    bytes.push(1);
    bytes.push(1);
  }
}

/// Writes the COD marker segment: LRCP progression, five decomposition
/// levels, 16x16 code-blocks, and the reversible or irreversible transform.
///
fn write_cod_segment(
  bytes: &mut Vec<u8>,
  config: &CompressionConfig,
  is_reversible: bool,
) {
  bytes.extend_from_slice(&j2k::COD);
  push_u16(bytes, 12);

  // Scod: default coding style
  bytes.push(0);

  // SGcod: LRCP progression, quality layers, no multiple component transform
  bytes.push(0);
  push_u16(bytes, config.quality_layers.max(1));
  bytes.push(0);

  // SPcod: decomposition levels, code-block exponents, code-block style, and
  // the wavelet transform selector
  bytes.push(5);
  bytes.push(4);
  bytes.push(4);
  bytes.push(0);
  bytes.push(if is_reversible { 1 } else { 0 });
}

/// Writes the QCD marker segment: no quantization for the reversible
/// transform, scalar quantization for the irreversible one.
///
fn write_qcd_segment(bytes: &mut Vec<u8>, is_reversible: bool) {
  bytes.extend_from_slice(&j2k::QCD);

  if is_reversible {
    push_u16(bytes, 4);
    bytes.push(0x22);
    bytes.push(0x00);
  } else {
    push_u16(bytes, 5);
    bytes.push(0x42);
    push_u16(bytes, 0x0088);
  }
}

/// Writes the SOT marker segment for the single tile-part, whose declared
/// length covers the SOT segment itself, the SOD marker, and the payload.
///
fn write_sot_segment(bytes: &mut Vec<u8>, payload_length: usize) {
  bytes.extend_from_slice(&j2k::SOT);
  push_u16(bytes, 10);
  push_u16(bytes, 0);
  push_u32(bytes, (12 + 2 + payload_length) as u32);
  bytes.push(0);
  bytes.push(1);
}

/// Horizontal differential encoding: the first sample verbatim, then each
/// sample's wrapping difference from its predecessor, in the sample width.
///
fn encode_reversible_payload(image: &ImageData) -> Vec<u8> {
  if image.bytes_per_sample() == 1 {
    let mut payload = Vec::with_capacity(image.data.len());

    let mut previous = 0u8;
    for &sample in image.data.iter() {
      payload.push(sample.wrapping_sub(previous));
      previous = sample;
    }

    payload
  } else {
    let samples = utils::read_samples_u16(&image.data);
    let mut deltas = Vec::with_capacity(samples.len());

    let mut previous = 0u16;
    for &sample in samples.iter() {
      deltas.push(sample.wrapping_sub(previous));
      previous = sample;
    }

    utils::write_samples_u16(&deltas)
  }
}

/// Shift quantization: one byte holding the quantization exponent, then every
/// sample right-shifted by it, in the sample width.
///
fn encode_irreversible_payload(
  image: &ImageData,
  config: &CompressionConfig,
) -> Vec<u8> {
  let shift = quantization_shift(image, config);

  let mut payload = Vec::with_capacity(1 + image.data.len());
  payload.push(shift as u8);

  if image.bytes_per_sample() == 1 {
    for &sample in image.data.iter() {
      payload.push(sample >> shift);
    }
  } else {
    let samples = utils::read_samples_u16(&image.data);
    let quantized: Vec<u16> =
      samples.iter().map(|sample| sample >> shift).collect();

    payload.extend_from_slice(&utils::write_samples_u16(&quantized));
  }

  payload
}

/// Derives the quantization exponent from the target compression ratio:
/// half the ratio's bit magnitude, capped below the sample precision.
///
fn quantization_shift(image: &ImageData, config: &CompressionConfig) -> u16 {
  let target_ratio = config
    .effective_target_ratio()
    .unwrap_or(FALLBACK_TARGET_RATIO);

  let shift = (target_ratio.log2() * 0.5).floor().max(0.0) as u16;

  shift.min(image.bits_per_sample - 1)
}

fn push_u16(bytes: &mut Vec<u8>, value: u16) {
  bytes.extend_from_slice(&value.to_be_bytes());
}

fn push_u32(bytes: &mut Vec<u8>, value: u32) {
  bytes.extend_from_slice(&value.to_be_bytes());
}
