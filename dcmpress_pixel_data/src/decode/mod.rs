//! Decoders that rebuild an [`dcmpress_core::ImageData`] from the bitstream
//! of a specific transfer syntax family.

pub mod jpeg_2000;
pub mod jpeg_ls;
pub mod native;
