use std::path::PathBuf;

use clap::Args;
use comfy_table::Table;

use dcmpress::core::{
  CodecKind, CompressionConfig, CompressionMode, transfer_syntax,
};
use dcmpress::p10;
use dcmpress::pipeline;

pub const ABOUT: &str =
  "Tries every codec and mode against a DICOM P10 file and reports the \
   compression each would achieve";

#[derive(Args)]
pub struct AnalyzeArgs {
  #[clap(help = "The name of the DICOM P10 file to analyze")]
  input_filename: PathBuf,

  #[arg(
    long,
    short = 'n',
    default_value_t = 2,
    help = "The per-sample error tolerance used for the near-lossless \
      attempt"
  )]
  near: u8,
}

/// The codec and mode combinations the analysis attempts.
///
const ATTEMPTS: [(CodecKind, CompressionMode); 5] = [
  (CodecKind::Jpeg2000, CompressionMode::Lossless),
  (CodecKind::Jpeg2000, CompressionMode::Lossy),
  (CodecKind::JpegLs, CompressionMode::Lossless),
  (CodecKind::JpegLs, CompressionMode::NearLossless),
  (CodecKind::Uncompressed, CompressionMode::Lossless),
];

pub fn run(args: &AnalyzeArgs) -> Result<(), ()> {
  let bytes = match std::fs::read(&args.input_filename) {
    Ok(bytes) => bytes,
    Err(e) => {
      eprintln!(
        "Error: Failed reading \"{}\": {}",
        args.input_filename.display(),
        e
      );
      return Err(());
    }
  };

  let instance = match p10::parse_dicom(&bytes) {
    Ok(instance) => instance,
    Err(e) => {
      eprintln!("Error: {e}");
      return Err(());
    }
  };

  let mut table = Table::new();
  table.set_header(vec![
    "Codec",
    "Mode",
    "Transfer syntax",
    "Size",
    "Ratio",
    "Savings",
  ]);

  for (codec, mode) in ATTEMPTS {
    let mut config = CompressionConfig::new(codec, mode);
    config.override_safety = true;
    if mode == CompressionMode::NearLossless {
      config.near_lossless = args.near;
    }

    match pipeline::compress_instance(&instance, bytes.len() as u64, &config) {
      Ok(result) => {
        let transfer_syntax_name =
          transfer_syntax::name_of(&result.transfer_syntax_uid)
            .unwrap_or(result.transfer_syntax_uid.as_str());

        table.add_row(vec![
          result.codec_name.clone(),
          mode.to_string(),
          transfer_syntax_name.to_string(),
          format!("{} bytes", result.compressed_size),
          format!("{:.2}:1", result.ratio()),
          format!("{:.1}%", result.savings_percent()),
        ]);
      }

      Err(e) => {
        table.add_row(vec![
          format!("{codec}"),
          mode.to_string(),
          "".to_string(),
          format!("skipped: {}", e.details()),
          "".to_string(),
          "".to_string(),
        ]);
      }
    }
  }

  println!(
    "Analysis of \"{}\" ({} bytes)",
    args.input_filename.display(),
    bytes.len()
  );
  println!("{table}");

  Ok(())
}
