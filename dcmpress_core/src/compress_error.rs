//! Provides the [`CompressError`] type that describes the failures that can
//! occur anywhere in the compression pipeline.

use crate::DcmpressError;

/// An error that occurred when parsing, validating, encoding, or writing DICOM
/// pixel data. An error is one of the following kinds:
///
/// 1. **DICOM parse**. The input's DICOM structure was recognized but could
///    not be read, e.g. a data element overran the buffer, or a required
///    element such as the pixel data is absent.
///
/// 2. **Unsupported transfer syntax**. The transfer syntax UID is not in the
///    registry of syntaxes this library knows how to produce or consume.
///
/// 3. **Codec failure**. An encoder or decoder rejected its input or produced
///    a bitstream it could not itself make sense of.
///
/// 4. **Invalid format**. The input is not DICOM P10 data at all, e.g. it is
///    shorter than the 132-byte preamble or lacks the `DICM` prefix.
///
/// 5. **Image data**. An in-memory image's dimensions and pixel buffer are
///    inconsistent with each other.
///
/// 6. **Configuration**. A compression configuration is internally
///    inconsistent, e.g. a non-zero near-lossless tolerance in lossless mode.
///
/// 7. **Validation**. A configuration that is internally consistent is not
///    permitted for the image's modality.
///
/// 8. **Compression constraint**. A post-encode check failed, e.g. a
///    round-trip verification did not reproduce the input.
///
/// 9. **Pipeline**. The orchestrator could not assemble a working
///    configuration, e.g. the selected codec cannot encode the image.
///
#[derive(Clone, Debug, PartialEq)]
pub enum CompressError {
  DicomParse { details: String },
  UnsupportedTransferSyntax { uid: String },
  CodecFailure { details: String },
  InvalidFormat { details: String },
  ImageData { details: String },
  Configuration { details: String },
  Validation { details: String },
  CompressionConstraint { details: String },
  Pipeline { details: String },
}

impl core::fmt::Display for CompressError {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    match self {
      Self::UnsupportedTransferSyntax { uid } => {
        write!(f, "{}: {}", self.name(), uid)
      }
      _ => write!(f, "{}: {}", self.name(), self.details()),
    }
  }
}

impl CompressError {
  /// Constructs a new 'DICOM parse' error.
  ///
  pub fn new_dicom_parse(details: impl Into<String>) -> Self {
    Self::DicomParse {
      details: details.into(),
    }
  }

  /// Constructs a new 'Codec failure' error.
  ///
  pub fn new_codec_failure(details: impl Into<String>) -> Self {
    Self::CodecFailure {
      details: details.into(),
    }
  }

  /// Constructs a new 'Invalid format' error.
  ///
  pub fn new_invalid_format(details: impl Into<String>) -> Self {
    Self::InvalidFormat {
      details: details.into(),
    }
  }

  /// Returns the name of an error kind as a human-readable string.
  ///
  pub fn name(&self) -> &'static str {
    match self {
      Self::DicomParse { .. } => "DICOM parse error",
      Self::UnsupportedTransferSyntax { .. } => "Unsupported transfer syntax",
      Self::CodecFailure { .. } => "Codec failure",
      Self::InvalidFormat { .. } => "Invalid format",
      Self::ImageData { .. } => "Image data error",
      Self::Configuration { .. } => "Configuration error",
      Self::Validation { .. } => "Validation error",
      Self::CompressionConstraint { .. } => "Compression constraint violated",
      Self::Pipeline { .. } => "Pipeline error",
    }
  }

  /// Returns the `details` field of the error.
  ///
  pub fn details(&self) -> &str {
    match self {
      Self::UnsupportedTransferSyntax { uid } => uid,
      Self::DicomParse { details }
      | Self::CodecFailure { details }
      | Self::InvalidFormat { details }
      | Self::ImageData { details }
      | Self::Configuration { details }
      | Self::Validation { details }
      | Self::CompressionConstraint { details }
      | Self::Pipeline { details } => details,
    }
  }
}

impl DcmpressError for CompressError {
  /// Returns lines of text that describe a compression error in a
  /// human-readable format.
  ///
  fn to_lines(&self, task_description: &str) -> Vec<String> {
    vec![
      format!("DICOM compression error {}", task_description),
      "".to_string(),
      format!("  Error: {}", self.name()),
      format!("  Details: {}", self.details()),
    ]
  }
}
