//! dcmpress is a collection of libraries and a CLI tool for compressing and
//! decompressing the pixel data of DICOM medical images.

/// Core types: the error taxonomy, transfer syntax registry, modality and
/// quality policy, compression configuration, and image and result records.
///
/// This module is a re-export of the `dcmpress_core` crate.
///
pub mod core {
  pub use dcmpress_core::*;
}

/// Reads and writes the DICOM Part 10 (P10) binary format.
///
/// This module is a re-export of the `dcmpress_p10` crate.
///
pub mod p10 {
  pub use dcmpress_p10::*;
}

/// Pixel data codecs and their capability descriptors.
///
/// This module is a re-export of the `dcmpress_pixel_data` crate.
///
pub mod pixel_data {
  pub use dcmpress_pixel_data::*;
}

pub mod pipeline;

mod integration_tests;
