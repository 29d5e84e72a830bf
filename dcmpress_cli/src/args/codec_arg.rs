use clap::{ValueEnum, builder::PossibleValue};

use dcmpress::core::CodecKind;

/// Enum for specifying a pixel data codec as a CLI argument.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CodecArg {
  Jpeg2000,
  JpegLs,
  Uncompressed,
}

impl From<CodecArg> for CodecKind {
  fn from(arg: CodecArg) -> CodecKind {
    match arg {
      CodecArg::Jpeg2000 => CodecKind::Jpeg2000,
      CodecArg::JpegLs => CodecKind::JpegLs,
      CodecArg::Uncompressed => CodecKind::Uncompressed,
    }
  }
}

impl ValueEnum for CodecArg {
  fn value_variants<'a>() -> &'a [Self] {
    &[Self::Jpeg2000, Self::JpegLs, Self::Uncompressed]
  }

  fn to_possible_value(&self) -> Option<PossibleValue> {
    Some(match self {
      Self::Jpeg2000 => PossibleValue::new("jpeg2000").alias("j2k").help(
        "The wavelet codestream codec. Supports lossless and lossy modes, \
          grayscale and color images.",
      ),

      Self::JpegLs => PossibleValue::new("jpegls").alias("jls").help(
        "The predictive codec. Supports lossless and near-lossless modes \
          for grayscale images.",
      ),

      Self::Uncompressed => PossibleValue::new("uncompressed")
        .alias("raw")
        .help("The identity codec. Stores pixel data unchanged."),
    })
  }
}
