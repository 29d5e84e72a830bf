use std::path::PathBuf;

use clap::Args;

use dcmpress::core::transfer_syntax;
use dcmpress::p10;

pub const ABOUT: &str = "Prints the image attributes of a DICOM P10 file";

#[derive(Args)]
pub struct InfoArgs {
  #[clap(help = "The name of the DICOM P10 file to describe")]
  input_filename: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<(), ()> {
  let instance = match p10::read_file(&args.input_filename) {
    Ok(instance) => instance,
    Err(e) => {
      eprintln!("Error: {e}");
      return Err(());
    }
  };

  let transfer_syntax_name =
    transfer_syntax::name_of(instance.transfer_syntax_uid())
      .unwrap_or(instance.transfer_syntax_uid());

  let pixel_data_kind = if instance.is_pixel_data_encapsulated() {
    " (encapsulated)"
  } else {
    ""
  };

  println!("DICOM file \"{}\"", args.input_filename.display());
  println!("  SOP Class UID:              {}", instance.sop_class_uid());
  println!("  SOP Instance UID:           {}", instance.sop_instance_uid());
  println!("  Transfer Syntax:            {transfer_syntax_name}");
  println!("  Modality:                   {}", instance.modality());
  println!("  Rows:                       {}", instance.rows());
  println!("  Columns:                    {}", instance.columns());
  println!("  Bits Allocated:             {}", instance.bits_allocated());
  println!("  Bits Stored:                {}", instance.bits_stored());
  println!("  High Bit:                   {}", instance.high_bit());
  println!(
    "  Pixel Representation:       {}",
    instance.pixel_representation()
  );
  println!(
    "  Samples Per Pixel:          {}",
    instance.samples_per_pixel()
  );
  println!(
    "  Photometric Interpretation: {}",
    instance.photometric_interpretation()
  );
  println!(
    "  Pixel Data:                 {} bytes{pixel_data_kind}",
    instance.pixel_data().len()
  );

  Ok(())
}
