//! The identity encoder for native uncompressed pixel data.

use dcmpress_core::{CompressError, CompressionConfig, ImageData};

/// Returns the image's pixel bytes unchanged.
///
pub fn encode(
  image: &ImageData,
  _config: &CompressionConfig,
) -> Result<Vec<u8>, CompressError> {
  Ok(image.data.clone())
}
