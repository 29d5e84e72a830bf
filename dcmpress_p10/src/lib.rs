//! Reads and writes the subset of the DICOM Part 10 (P10) binary format
//! needed to extract pixel data and image attributes from a file, and to emit
//! a conformant file with encapsulated pixel data under a chosen transfer
//! syntax.

pub mod dicom_instance;
pub mod p10_read;
pub mod p10_write;
pub mod uids;
pub mod value_representation;

mod internal;

use dcmpress_core::CompressError;

pub use dicom_instance::DicomInstance;
pub use value_representation::ValueRepresentation;

/// Returns whether the given bytes contain DICOM P10 data by checking for the
/// presence of the 'DICM' prefix at offset 128.
///
pub fn is_valid_bytes(bytes: &[u8]) -> bool {
  bytes.len() >= 132 && bytes[128..132] == *b"DICM".as_slice()
}

/// Parses DICOM P10 bytes into a [`DicomInstance`].
///
pub fn parse_dicom(bytes: &[u8]) -> Result<DicomInstance, CompressError> {
  p10_read::parse_bytes(bytes)
}

/// Reads a DICOM P10 file into a [`DicomInstance`].
///
pub fn read_file(
  path: impl AsRef<std::path::Path>,
) -> Result<DicomInstance, CompressError> {
  let bytes = std::fs::read(&path).map_err(|e| CompressError::DicomParse {
    details: format!(
      "Failed reading \"{}\": {}",
      path.as_ref().display(),
      e
    ),
  })?;

  parse_dicom(&bytes)
}
