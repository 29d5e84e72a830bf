use std::path::PathBuf;

use clap::Args;

use dcmpress::core::{CompressionConfig, transfer_syntax};
use dcmpress::pipeline;

use crate::args::{CodecArg, ModeArg};

pub const ABOUT: &str = "Compresses the pixel data of a DICOM P10 file";

#[derive(Args)]
pub struct CompressArgs {
  #[clap(help = "The name of the input DICOM P10 file")]
  input_filename: PathBuf,

  #[clap(help = "The name of the output DICOM P10 file")]
  output_filename: PathBuf,

  #[arg(
    long,
    short = 'c',
    value_enum,
    default_value = "jpeg2000",
    help = "The codec used to encode the output pixel data"
  )]
  codec: CodecArg,

  #[arg(
    long,
    short = 'm',
    value_enum,
    default_value = "lossless",
    help = "The compression mode"
  )]
  mode: ModeArg,

  #[arg(
    long,
    short = 'r',
    help = "The target compression ratio for lossy encoding. Defaults to \
      the quality preset's ratio."
  )]
  ratio: Option<f64>,

  #[arg(
    long,
    short = 'n',
    default_value_t = 0,
    help = "The per-sample error tolerance for near-lossless encoding"
  )]
  near: u8,

  #[arg(
    long,
    default_value_t = false,
    help = "Decode the encoded pixel data and verify it against the input \
      before writing the output file"
  )]
  verify: bool,

  #[arg(
    long,
    default_value_t = false,
    help = "Allow lossy modes for modalities whose policy requires lossless \
      compression. A warning is printed when this takes effect."
  )]
  override_safety: bool,
}

pub fn run(args: &CompressArgs) -> Result<(), ()> {
  let mut config = CompressionConfig::new(args.codec.into(), args.mode.into());
  config.target_ratio = args.ratio;
  config.near_lossless = args.near;
  config.verify_roundtrip = args.verify;
  config.override_safety = args.override_safety;

  match pipeline::compress_file(
    &args.input_filename,
    &config,
    Some(&args.output_filename),
  ) {
    Ok(result) => {
      for warning in result.warnings.iter() {
        eprintln!("Warning: {warning}");
      }

      let transfer_syntax_name =
        transfer_syntax::name_of(&result.transfer_syntax_uid)
          .unwrap_or(result.transfer_syntax_uid.as_str());

      println!(
        "Compressed \"{}\" => \"{}\"",
        args.input_filename.display(),
        args.output_filename.display()
      );
      println!("  Codec:           {}", result.codec_name);
      println!("  Transfer syntax: {transfer_syntax_name}");
      println!("  Original size:   {} bytes", result.original_size);
      println!("  Compressed size: {} bytes", result.compressed_size);
      println!("  Ratio:           {:.2}:1", result.ratio());
      println!("  Savings:         {:.1}%", result.savings_percent());
      println!("  Time:            {} ms", result.elapsed_ms);

      Ok(())
    }

    Err(e) => {
      eprintln!("Error: {e}");
      Err(())
    }
  }
}
