//! Core types for dcmpress: the error taxonomy, data element tags, the
//! transfer syntax registry, modality and quality policy, compression
//! configuration, and the in-memory image and result records shared by the
//! DICOM P10 and pixel data crates.

pub mod compress_error;
pub mod compression_config;
pub mod compression_result;
pub mod data_element_tag;
pub mod dictionary;
pub mod error;
pub mod image_data;
pub mod modality;
pub mod transfer_syntax;

pub use compress_error::CompressError;
pub use compression_config::{
  CodecKind, CompressionConfig, CompressionMode, QualityPreset,
};
pub use compression_result::CompressionResult;
pub use data_element_tag::DataElementTag;
pub use error::DcmpressError;
pub use image_data::ImageData;
pub use modality::{Modality, modality_from_code};
pub use transfer_syntax::TransferSyntax;
