//! The codec abstraction: declarative descriptors for each pixel data codec
//! and a common trait for encoding and decoding through them.

use dcmpress_core::{
  CodecKind, CompressError, CompressionConfig, CompressionMode, ImageData,
  TransferSyntax, transfer_syntax,
};

use crate::{decode, encode};

/// Identifying information for a pixel data codec.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodecInfo {
  pub name: &'static str,
  pub version: &'static str,
  pub description: &'static str,
}

/// What a pixel data codec is able to encode and decode, and the transfer
/// syntaxes its output is filed under.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodecCapabilities {
  pub supports_lossless: bool,
  pub supports_lossy: bool,
  pub supports_progressive: bool,
  pub supports_roi: bool,

  pub lossless_transfer_syntax: Option<&'static TransferSyntax>,
  pub lossy_transfer_syntax: Option<&'static TransferSyntax>,

  pub max_bits_per_sample: u16,
  pub supports_signed: bool,
  pub supports_color: bool,
  pub supports_multiframe: bool,
}

/// A pixel data codec: a symmetric encoder/decoder pair together with the
/// descriptors that let the pipeline select and constrain it.
///
pub trait PixelDataCodec {
  /// Returns identifying information for the codec.
  ///
  fn info(&self) -> CodecInfo;

  /// Returns what the codec can encode and decode.
  ///
  fn capabilities(&self) -> CodecCapabilities;

  /// Encodes an image into the codec's bitstream.
  ///
  fn encode(
    &self,
    image: &ImageData,
    config: &CompressionConfig,
  ) -> Result<Vec<u8>, CompressError>;

  /// Decodes the codec's bitstream back into an image with the given
  /// geometry.
  ///
  fn decode(
    &self,
    bytes: &[u8],
    width: u16,
    height: u16,
    bits_per_sample: u16,
    samples_per_pixel: u16,
  ) -> Result<ImageData, CompressError>;

  /// Returns the transfer syntax the codec's output is filed under for the
  /// given compression mode, if it has one.
  ///
  fn transfer_syntax_for(
    &self,
    mode: CompressionMode,
  ) -> Option<&'static TransferSyntax> {
    let capabilities = self.capabilities();

    match mode {
      CompressionMode::Lossless => capabilities.lossless_transfer_syntax,
      CompressionMode::Lossy => capabilities.lossy_transfer_syntax,
      CompressionMode::NearLossless => None,
    }
  }

  /// Returns whether the codec is able to encode the given image.
  ///
  fn can_encode(&self, image: &ImageData) -> bool {
    let capabilities = self.capabilities();

    image.bits_per_sample <= capabilities.max_bits_per_sample
      && (capabilities.supports_signed || !image.is_signed)
      && (capabilities.supports_color || image.samples_per_pixel == 1)
  }
}

/// The wavelet/codestream codec producing a JPEG 2000 family bitstream.
///
pub struct Jpeg2000Codec;

impl PixelDataCodec for Jpeg2000Codec {
  fn info(&self) -> CodecInfo {
    CodecInfo {
      name: "JPEG 2000",
      version: "1.0",
      description: "Wavelet codestream codec with reversible and \
        irreversible modes",
    }
  }

  fn capabilities(&self) -> CodecCapabilities {
    CodecCapabilities {
      supports_lossless: true,
      supports_lossy: true,
      supports_progressive: true,
      supports_roi: false,
      lossless_transfer_syntax: Some(&transfer_syntax::JPEG_2K_LOSSLESS_ONLY),
      lossy_transfer_syntax: Some(&transfer_syntax::JPEG_2K),
      max_bits_per_sample: 16,
      supports_signed: true,
      supports_color: true,
      supports_multiframe: false,
    }
  }

  fn encode(
    &self,
    image: &ImageData,
    config: &CompressionConfig,
  ) -> Result<Vec<u8>, CompressError> {
    encode::jpeg_2000::encode(image, config)
  }

  fn decode(
    &self,
    bytes: &[u8],
    width: u16,
    height: u16,
    bits_per_sample: u16,
    samples_per_pixel: u16,
  ) -> Result<ImageData, CompressError> {
    decode::jpeg_2000::decode(
      bytes,
      width,
      height,
      bits_per_sample,
      samples_per_pixel,
    )
  }
}

/// The predictive codec producing a JPEG-LS family bitstream.
///
pub struct JpegLsCodec;

impl PixelDataCodec for JpegLsCodec {
  fn info(&self) -> CodecInfo {
    CodecInfo {
      name: "JPEG-LS",
      version: "1.0",
      description: "Median edge detector predictive codec with lossless and \
        near-lossless modes",
    }
  }

  fn capabilities(&self) -> CodecCapabilities {
    CodecCapabilities {
      supports_lossless: true,
      supports_lossy: true,
      supports_progressive: false,
      supports_roi: false,
      lossless_transfer_syntax: Some(&transfer_syntax::JPEG_LS_LOSSLESS),
      lossy_transfer_syntax: Some(&transfer_syntax::JPEG_LS_NEAR_LOSSLESS),
      max_bits_per_sample: 16,
      supports_signed: false,
      supports_color: false,
      supports_multiframe: false,
    }
  }

  fn encode(
    &self,
    image: &ImageData,
    config: &CompressionConfig,
  ) -> Result<Vec<u8>, CompressError> {
    encode::jpeg_ls::encode(image, config)
  }

  fn decode(
    &self,
    bytes: &[u8],
    width: u16,
    height: u16,
    bits_per_sample: u16,
    samples_per_pixel: u16,
  ) -> Result<ImageData, CompressError> {
    decode::jpeg_ls::decode(
      bytes,
      width,
      height,
      bits_per_sample,
      samples_per_pixel,
    )
  }

  /// The JPEG-LS family files both its lossy modes under the near-lossless
  /// transfer syntax.
  ///
  fn transfer_syntax_for(
    &self,
    mode: CompressionMode,
  ) -> Option<&'static TransferSyntax> {
    match mode {
      CompressionMode::Lossless => Some(&transfer_syntax::JPEG_LS_LOSSLESS),
      CompressionMode::Lossy | CompressionMode::NearLossless => {
        Some(&transfer_syntax::JPEG_LS_NEAR_LOSSLESS)
      }
    }
  }
}

/// The identity codec for native uncompressed pixel data.
///
pub struct UncompressedCodec;

impl PixelDataCodec for UncompressedCodec {
  fn info(&self) -> CodecInfo {
    CodecInfo {
      name: "Uncompressed",
      version: "1.0",
      description: "Identity codec for native little endian pixel data",
    }
  }

  fn capabilities(&self) -> CodecCapabilities {
    CodecCapabilities {
      supports_lossless: true,
      supports_lossy: false,
      supports_progressive: false,
      supports_roi: false,
      lossless_transfer_syntax: Some(
        &transfer_syntax::EXPLICIT_VR_LITTLE_ENDIAN,
      ),
      lossy_transfer_syntax: None,
      max_bits_per_sample: 16,
      supports_signed: true,
      supports_color: true,
      supports_multiframe: false,
    }
  }

  fn encode(
    &self,
    image: &ImageData,
    config: &CompressionConfig,
  ) -> Result<Vec<u8>, CompressError> {
    encode::native::encode(image, config)
  }

  fn decode(
    &self,
    bytes: &[u8],
    width: u16,
    height: u16,
    bits_per_sample: u16,
    samples_per_pixel: u16,
  ) -> Result<ImageData, CompressError> {
    decode::native::decode(
      bytes,
      width,
      height,
      bits_per_sample,
      samples_per_pixel,
    )
  }
}

/// Returns the codec for a [`CodecKind`].
///
pub fn codec_for(kind: CodecKind) -> Box<dyn PixelDataCodec> {
  match kind {
    CodecKind::Jpeg2000 => Box::new(Jpeg2000Codec),
    CodecKind::JpegLs => Box::new(JpegLsCodec),
    CodecKind::Uncompressed => Box::new(UncompressedCodec),
  }
}

/// Identifies the codec that produced a bitstream from its leading marker
/// bytes. Anything that is not a recognized codestream is treated as native
/// uncompressed pixel data.
///
pub fn sniff_codec(bytes: &[u8]) -> CodecKind {
  if bytes.starts_with(&[0xFF, 0x4F, 0xFF, 0x51]) {
    CodecKind::Jpeg2000
  } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF, 0xF7]) {
    CodecKind::JpegLs
  } else {
    CodecKind::Uncompressed
  }
}
