use clap::{ValueEnum, builder::PossibleValue};

use dcmpress::core::CompressionMode;

/// Enum for specifying a compression mode as a CLI argument.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModeArg {
  Lossless,
  Lossy,
  NearLossless,
}

impl From<ModeArg> for CompressionMode {
  fn from(arg: ModeArg) -> CompressionMode {
    match arg {
      ModeArg::Lossless => CompressionMode::Lossless,
      ModeArg::Lossy => CompressionMode::Lossy,
      ModeArg::NearLossless => CompressionMode::NearLossless,
    }
  }
}

impl ValueEnum for ModeArg {
  fn value_variants<'a>() -> &'a [Self] {
    &[Self::Lossless, Self::Lossy, Self::NearLossless]
  }

  fn to_possible_value(&self) -> Option<PossibleValue> {
    Some(match self {
      Self::Lossless => PossibleValue::new("lossless")
        .help("Decoding reproduces the input bit-exactly."),

      Self::Lossy => PossibleValue::new("lossy").help(
        "Decoding approximates the input under the target compression \
          ratio.",
      ),

      Self::NearLossless => PossibleValue::new("nearlossless").help(
        "Decoding reproduces every sample to within the tolerance given by \
          --near. Only supported by the JPEG-LS codec.",
      ),
    })
  }
}
