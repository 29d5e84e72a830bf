//! Configuration used when compressing pixel data, validated against the
//! modality policy before any codec runs.

use crate::{CompressError, Modality};

/// The pixel data codecs available to the compression pipeline.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CodecKind {
  /// The wavelet/codestream codec producing a JPEG 2000 family bitstream.
  Jpeg2000,

  /// The predictive codec producing a JPEG-LS family bitstream.
  JpegLs,

  /// The identity codec for native uncompressed pixel data.
  Uncompressed,
}

impl core::fmt::Display for CodecKind {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    let name = match self {
      Self::Jpeg2000 => "JPEG 2000",
      Self::JpegLs => "JPEG-LS",
      Self::Uncompressed => "Uncompressed",
    };

    write!(f, "{name}")
  }
}

/// The compression mode requested of a codec.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompressionMode {
  /// Decoding reproduces the input bit-exactly.
  Lossless,

  /// Decoding approximates the input under a target compression ratio.
  Lossy,

  /// Decoding reproduces every sample to within a fixed tolerance.
  NearLossless,
}

impl core::fmt::Display for CompressionMode {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    let name = match self {
      Self::Lossless => "lossless",
      Self::Lossy => "lossy",
      Self::NearLossless => "near-lossless",
    };

    write!(f, "{name}")
  }
}

/// Named quality presets that expand to a target compression ratio and a
/// quality layer count for lossy encoding.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QualityPreset {
  /// No ratio target. Used where every stored bit matters.
  Diagnostic,

  /// Approximately 10:1.
  HighQuality,

  /// Approximately 20:1.
  Standard,

  /// Approximately 50:1. For thumbnails and previews only.
  Preview,
}

impl QualityPreset {
  /// Returns the compression ratio this preset aims for, if it has one.
  ///
  pub fn target_ratio(&self) -> Option<f64> {
    match self {
      Self::Diagnostic => None,
      Self::HighQuality => Some(10.0),
      Self::Standard => Some(20.0),
      Self::Preview => Some(50.0),
    }
  }

  /// Returns the number of quality layers encoded for this preset.
  ///
  pub fn quality_layers(&self) -> u16 {
    match self {
      Self::Diagnostic => 1,
      Self::HighQuality => 5,
      Self::Standard => 3,
      Self::Preview => 2,
    }
  }
}

/// The full parameter bundle for one compression operation.
///
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionConfig {
  /// The codec to encode with.
  pub codec: CodecKind,

  /// The compression mode requested.
  pub mode: CompressionMode,

  /// The quality preset that supplies the ratio and layer defaults.
  pub quality_preset: QualityPreset,

  /// An explicit target compression ratio. Overrides the preset's ratio.
  /// Ignored unless the mode is [`CompressionMode::Lossy`].
  pub target_ratio: Option<f64>,

  /// The number of quality layers to encode.
  pub quality_layers: u16,

  /// Tile size. Reserved; whole-image tiles are always used.
  pub tile_size: u16,

  /// The per-sample error tolerance for near-lossless encoding, in the range
  /// 0 through 255. Must be zero in lossless mode.
  pub near_lossless: u8,

  /// Whether non-pixel metadata from the source instance is carried through
  /// to the output file.
  pub preserve_metadata: bool,

  /// Whether to decode the encoded pixel data and verify it against the
  /// input before returning success.
  pub verify_roundtrip: bool,

  /// Allows a lossy mode through for a modality whose policy requires
  /// lossless. A warning is attached to the result when this is exercised.
  pub override_safety: bool,
}

impl CompressionConfig {
  /// Creates a configuration for the given codec and mode, taking ratio and
  /// layer defaults from [`QualityPreset::Standard`].
  ///
  pub fn new(codec: CodecKind, mode: CompressionMode) -> Self {
    Self::with_preset(codec, mode, QualityPreset::Standard)
  }

  /// Creates a configuration for the given codec and mode with defaults taken
  /// from the given quality preset.
  ///
  pub fn with_preset(
    codec: CodecKind,
    mode: CompressionMode,
    quality_preset: QualityPreset,
  ) -> Self {
    Self {
      codec,
      mode,
      quality_preset,
      target_ratio: None,
      quality_layers: quality_preset.quality_layers(),
      tile_size: 0,
      near_lossless: 0,
      preserve_metadata: true,
      verify_roundtrip: false,
      override_safety: false,
    }
  }

  /// Returns the target compression ratio in effect: the explicit ratio if
  /// one was set, otherwise the preset's. Only meaningful in lossy mode.
  ///
  pub fn effective_target_ratio(&self) -> Option<f64> {
    self.target_ratio.or(self.quality_preset.target_ratio())
  }

  /// Checks the configuration for internal consistency.
  ///
  pub fn validate(&self) -> Result<(), CompressError> {
    if self.mode == CompressionMode::Lossless && self.near_lossless != 0 {
      return Err(CompressError::Configuration {
        details: format!(
          "Near-lossless tolerance {} is not allowed in lossless mode",
          self.near_lossless
        ),
      });
    }

    if self.mode == CompressionMode::NearLossless
      && self.codec != CodecKind::JpegLs
    {
      return Err(CompressError::Configuration {
        details: format!(
          "The {} codec does not support near-lossless mode",
          self.codec
        ),
      });
    }

    if self.mode == CompressionMode::Lossy {
      if let Some(ratio) = self.effective_target_ratio() {
        if !ratio.is_finite() || ratio <= 1.0 {
          return Err(CompressError::Configuration {
            details: format!("Target ratio {ratio} must be greater than 1"),
          });
        }
      }
    }

    Ok(())
  }

  /// Checks the configuration against the policy for the given modality.
  ///
  /// A modality that requires lossless compression rejects every other mode
  /// unless `override_safety` is set.
  ///
  pub fn validate_for_modality(
    &self,
    modality: Modality,
  ) -> Result<(), CompressError> {
    self.validate()?;

    if modality.requires_lossless()
      && self.mode != CompressionMode::Lossless
      && !self.override_safety
    {
      return Err(CompressError::Validation {
        details: format!(
          "Modality {} requires lossless compression, but {} mode was \
           requested",
          modality.code(),
          self.mode
        ),
      });
    }

    Ok(())
  }
}
