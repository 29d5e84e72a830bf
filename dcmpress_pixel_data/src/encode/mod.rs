//! Encoders that turn an [`dcmpress_core::ImageData`] into the bitstream for
//! a specific transfer syntax family.

pub mod jpeg_2000;
pub mod jpeg_ls;
pub mod native;
