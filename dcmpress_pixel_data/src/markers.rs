//! Marker codes for the JPEG-family codestreams emitted by the codecs. All
//! markers are two bytes, `0xFF` followed by the marker code.

/// JPEG 2000 codestream markers.
///
pub mod j2k {
  /// Start of codestream.
  pub const SOC: [u8; 2] = [0xFF, 0x4F];

  /// Image and tile size.
  pub const SIZ: [u8; 2] = [0xFF, 0x51];

  /// Coding style default.
  pub const COD: [u8; 2] = [0xFF, 0x52];

  /// Quantization default.
  pub const QCD: [u8; 2] = [0xFF, 0x5C];

  /// Start of tile-part.
  pub const SOT: [u8; 2] = [0xFF, 0x90];

  /// Start of data.
  pub const SOD: [u8; 2] = [0xFF, 0x93];

  /// End of codestream.
  pub const EOC: [u8; 2] = [0xFF, 0xD9];
}

/// JPEG-LS markers.
///
pub mod jpeg_ls {
  /// Start of image.
  pub const SOI: [u8; 2] = [0xFF, 0xD8];

  /// Start of frame, JPEG-LS.
  pub const SOF55: [u8; 2] = [0xFF, 0xF7];

  /// JPEG-LS preset parameters.
  pub const LSE: [u8; 2] = [0xFF, 0xF8];

  /// Start of scan.
  pub const SOS: [u8; 2] = [0xFF, 0xDA];

  /// End of image.
  pub const EOI: [u8; 2] = [0xFF, 0xD9];
}
