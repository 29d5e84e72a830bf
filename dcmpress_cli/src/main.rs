//! Entry point for the dcmpress CLI tool.

mod args;
mod commands;

use clap::{Parser, Subcommand};

use commands::{analyze_command, compress_command, info_command};

#[derive(Parser)]
#[command(
  name = "dcmpress",
  bin_name = "dcmpress",
  version = env!("CARGO_PKG_VERSION"),
  about = "dcmpress is a CLI tool for compressing and decompressing the \
    pixel data of DICOM files",
  max_term_width = 80
)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  #[command(about = compress_command::ABOUT)]
  Compress(compress_command::CompressArgs),

  #[command(about = info_command::ABOUT)]
  Info(info_command::InfoArgs),

  #[command(about = analyze_command::ABOUT)]
  Analyze(analyze_command::AnalyzeArgs),
}

fn main() -> Result<(), ()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Compress(args) => compress_command::run(&args),
    Commands::Info(args) => info_command::run(&args),
    Commands::Analyze(args) => analyze_command::run(&args),
  }
}
