//! Pixel data codecs for dcmpress: a wavelet/codestream codec producing a
//! JPEG 2000 family bitstream, a predictive codec producing a JPEG-LS family
//! bitstream, and an identity codec for native uncompressed pixel data.
//!
//! The bitstreams are frame-faithful: the marker sequences, segment lengths,
//! and parameter values are legal for their families, but the entropy payload
//! is a simpler internal representation that round-trips within dcmpress
//! rather than a standards-conformant entropy-coded stream.

pub mod codec;
pub mod decode;
pub mod encode;
pub mod markers;
pub mod med_predictor;
pub mod utils;

pub use codec::{
  CodecCapabilities, CodecInfo, Jpeg2000Codec, JpegLsCodec, PixelDataCodec,
  UncompressedCodec, codec_for, sniff_codec,
};
