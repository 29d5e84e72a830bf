//! The summary record returned by a successful compression.

use std::path::PathBuf;

/// Describes the outcome of one compression operation: how large the input
/// and output were, which codec and transfer syntax produced the output, and
/// where the output went.
///
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionResult {
  /// Size in bytes of the input DICOM file.
  pub original_size: u64,

  /// Size in bytes of the output DICOM file.
  pub compressed_size: u64,

  /// Name of the codec that encoded the pixel data.
  pub codec_name: String,

  /// UID of the transfer syntax the output file was written under.
  pub transfer_syntax_uid: String,

  /// Whether the encoding preserves the pixel data bit-exactly.
  pub is_lossless: bool,

  /// Wall-clock time the compression took, in milliseconds.
  pub elapsed_ms: u64,

  /// The path the output file was written to, when one was supplied.
  pub output_path: Option<PathBuf>,

  /// The output file's bytes, when no output path was supplied.
  pub output_bytes: Option<Vec<u8>>,

  /// Human-readable warnings, e.g. when a safety override forced a lossy
  /// mode through for a lossless-only modality.
  pub warnings: Vec<String>,
}

impl CompressionResult {
  /// Returns the achieved compression ratio, original size over compressed
  /// size. Zero when the compressed size is zero.
  ///
  pub fn ratio(&self) -> f64 {
    if self.compressed_size == 0 {
      return 0.0;
    }

    self.original_size as f64 / self.compressed_size as f64
  }

  /// Returns the space saved by compression as a percentage of the original
  /// size. Zero when the original size is zero.
  ///
  pub fn savings_percent(&self) -> f64 {
    if self.original_size == 0 {
      return 0.0;
    }

    (1.0 - self.compressed_size as f64 / self.original_size as f64) * 100.0
  }
}
