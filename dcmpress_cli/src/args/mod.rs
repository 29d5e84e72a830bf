pub mod codec_arg;
pub mod mode_arg;

pub use codec_arg::CodecArg;
pub use mode_arg::ModeArg;
