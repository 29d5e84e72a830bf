//! The compression pipeline: parse the input, validate the configuration
//! against the image's modality, encode the pixel data, and write the output
//! file. The reverse path decodes an encoded pixel data payload back into
//! image data.

use std::path::Path;
use std::time::Instant;

use dcmpress_core::{
  CompressError, CompressionConfig, CompressionMode, CompressionResult,
  ImageData, modality_from_code,
};
use dcmpress_p10::{DicomInstance, p10_write, parse_dicom};
use dcmpress_pixel_data::{PixelDataCodec, codec_for, sniff_codec};

/// Compresses a DICOM file, optionally writing the result to an output path.
/// When no output path is supplied the output file's bytes are carried in the
/// returned [`CompressionResult`].
///
pub fn compress_file(
  input_path: impl AsRef<Path>,
  config: &CompressionConfig,
  output_path: Option<&Path>,
) -> Result<CompressionResult, CompressError> {
  let input_path = input_path.as_ref();

  let bytes = std::fs::read(input_path).map_err(|e| CompressError::Pipeline {
    details: format!("Failed reading \"{}\": {}", input_path.display(), e),
  })?;

  let instance = parse_dicom(&bytes)?;
  let mut result = compress_instance(&instance, bytes.len() as u64, config)?;

  if let Some(output_path) = output_path {
    if let Some(output_bytes) = result.output_bytes.take() {
      std::fs::write(output_path, &output_bytes).map_err(|e| {
        CompressError::Pipeline {
          details: format!(
            "Failed writing \"{}\": {}",
            output_path.display(),
            e
          ),
        }
      })?;
    }

    result.output_path = Some(output_path.to_path_buf());
  }

  Ok(result)
}

/// Compresses DICOM P10 bytes held in memory. The output file's bytes are
/// carried in the returned [`CompressionResult`].
///
pub fn compress_bytes(
  bytes: &[u8],
  config: &CompressionConfig,
) -> Result<CompressionResult, CompressError> {
  let instance = parse_dicom(bytes)?;

  compress_instance(&instance, bytes.len() as u64, config)
}

/// Compresses a parsed DICOM instance. `original_size` is the byte size of
/// the input the instance was parsed from and is only used for the result's
/// size statistics.
///
pub fn compress_instance(
  instance: &DicomInstance,
  original_size: u64,
  config: &CompressionConfig,
) -> Result<CompressionResult, CompressError> {
  let started_at = Instant::now();

  let modality = modality_from_code(instance.modality());
  config.validate_for_modality(modality)?;

  let mut warnings = vec![];
  if modality.requires_lossless() && config.mode != CompressionMode::Lossless
  {
    warnings.push(format!(
      "Modality {} requires lossless compression; continuing in {} mode \
       because the safety override is set",
      modality.code(),
      config.mode
    ));
  }

  let image = instance.get_image_data()?;

  let codec = codec_for(config.codec);

  if !codec.can_encode(&image) {
    let signedness = if image.is_signed { ", signed" } else { "" };

    return Err(CompressError::Pipeline {
      details: format!(
        "The {} codec cannot encode this image ({} bits per sample, {} \
         samples per pixel{})",
        codec.info().name,
        image.bits_per_sample,
        image.samples_per_pixel,
        signedness,
      ),
    });
  }

  let Some(transfer_syntax) = codec.transfer_syntax_for(config.mode) else {
    return Err(CompressError::Pipeline {
      details: format!(
        "The {} codec has no transfer syntax for {} mode",
        codec.info().name,
        config.mode
      ),
    });
  };

  let encoded = codec.encode(&image, config)?;

  if config.verify_roundtrip {
    verify_round_trip(codec.as_ref(), &encoded, &image, config)?;
  }

  let output_bytes = p10_write::write_bytes(instance, &encoded, transfer_syntax);

  Ok(CompressionResult {
    original_size,
    compressed_size: output_bytes.len() as u64,
    codec_name: codec.info().name.to_string(),
    transfer_syntax_uid: transfer_syntax.uid.to_string(),
    is_lossless: transfer_syntax.is_lossless,
    elapsed_ms: started_at.elapsed().as_millis() as u64,
    output_path: None,
    output_bytes: Some(output_bytes),
    warnings,
  })
}

/// Decodes an encoded pixel data payload back into image data. The codec is
/// identified from the payload's leading marker bytes; anything that is not a
/// recognized codestream is treated as native uncompressed samples.
///
pub fn decompress(
  bytes: &[u8],
  width: u16,
  height: u16,
  bits_per_sample: u16,
  samples_per_pixel: u16,
) -> Result<ImageData, CompressError> {
  let codec = codec_for(sniff_codec(bytes));

  codec.decode(bytes, width, height, bits_per_sample, samples_per_pixel)
}

/// Decodes freshly encoded pixel data and checks it against the input image:
/// bit-exact for lossless, within the near-lossless tolerance for
/// near-lossless. Lossy output has no bound to check and is not verified.
///
fn verify_round_trip(
  codec: &dyn PixelDataCodec,
  encoded: &[u8],
  image: &ImageData,
  config: &CompressionConfig,
) -> Result<(), CompressError> {
  let decoded = codec.decode(
    encoded,
    image.width,
    image.height,
    image.bits_per_sample,
    image.samples_per_pixel,
  )?;

  match config.mode {
    CompressionMode::Lossless => {
      if decoded.data != image.data {
        return Err(CompressError::CompressionConstraint {
          details: "Lossless round-trip verification failed: the decoded \
            pixel data does not match the input"
            .to_string(),
        });
      }
    }

    CompressionMode::NearLossless => {
      let tolerance = if image.bytes_per_sample() == 1 {
        i32::from(config.near_lossless)
      } else {
        i32::from(config.near_lossless) * 256
      };

      let within_tolerance = if image.bytes_per_sample() == 1 {
        decoded.data.iter().zip(image.data.iter()).all(
          |(reconstructed, original)| {
            (i32::from(*reconstructed) - i32::from(*original)).abs()
              <= tolerance
          },
        )
      } else {
        decoded
          .data
          .chunks_exact(2)
          .zip(image.data.chunks_exact(2))
          .all(|(reconstructed, original)| {
            let reconstructed = i32::from(u16::from_le_bytes([
              reconstructed[0],
              reconstructed[1],
            ]));
            let original =
              i32::from(u16::from_le_bytes([original[0], original[1]]));

            (reconstructed - original).abs() <= tolerance
          })
      };

      if !within_tolerance {
        return Err(CompressError::CompressionConstraint {
          details: format!(
            "Near-lossless round-trip verification failed: a decoded sample \
             is more than {} from the input",
            config.near_lossless
          ),
        });
      }
    }

    CompressionMode::Lossy => (),
  }

  Ok(())
}
