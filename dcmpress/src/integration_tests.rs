#[cfg(test)]
mod tests {
  use crate::core::{
    CodecKind, CompressError, CompressionConfig, CompressionMode,
    transfer_syntax,
  };
  use crate::p10::parse_dicom;
  use crate::pipeline;

  /// Builds a native explicit VR little endian DICOM file around the given
  /// pixel data. When `with_extra_metadata` is set, a handful of typical
  /// identifying elements are included, which the compression writer does not
  /// carry through to its output.
  ///
  fn build_native_dicom(
    width: u16,
    height: u16,
    bits: u16,
    modality: &str,
    pixel_data: &[u8],
    with_extra_metadata: bool,
  ) -> Vec<u8> {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");

    write_element(&mut bytes, 0x0002, 0x0010, b"UI", b"1.2.840.10008.1.2.1\0");
    write_element(&mut bytes, 0x0008, 0x0016, b"UI", b"1.2.840.10008.5.1.4.1.1.2\0");
    write_element(&mut bytes, 0x0008, 0x0018, b"UI", b"1.2.3.4.5.6.7.8\0");

    if with_extra_metadata {
      write_element(&mut bytes, 0x0008, 0x0020, b"DA", b"20240101");
      write_element(&mut bytes, 0x0008, 0x0030, b"TM", b"081530");
      write_element(&mut bytes, 0x0008, 0x0050, b"SH", b"ACC-20240101-0017\0");
    }

    write_element(&mut bytes, 0x0008, 0x0060, b"CS", modality.as_bytes());

    if with_extra_metadata {
      write_element(&mut bytes, 0x0008, 0x0070, b"LO", b"Example Imaging Inc.");
      write_element(&mut bytes, 0x0008, 0x0080, b"LO", b"Example Hospital");
      write_element(&mut bytes, 0x0008, 0x0090, b"PN", b"SMITH^ALEX^^DR\0\0");
      write_element(&mut bytes, 0x0008, 0x1030, b"LO", b"Routine chest study\0");
      write_element(&mut bytes, 0x0008, 0x103E, b"LO", b"Axial series, plain\0");
      write_element(&mut bytes, 0x0010, 0x0010, b"PN", b"DOE^JANE\0\0");
      write_element(&mut bytes, 0x0010, 0x0020, b"LO", b"PID-0001\0\0");
      write_element(&mut bytes, 0x0010, 0x0030, b"DA", b"19700101");
      write_element(&mut bytes, 0x0010, 0x0040, b"CS", b"F\0");
      write_element(
        &mut bytes,
        0x0020,
        0x000D,
        b"UI",
        b"1.2.826.0.1.3680043.2.1125.1.20240101081530.1\0",
      );
      write_element(
        &mut bytes,
        0x0020,
        0x000E,
        b"UI",
        b"1.2.826.0.1.3680043.2.1125.1.20240101081530.2\0",
      );
      write_element(&mut bytes, 0x0020, 0x0011, b"IS", b"1\0");
      write_element(&mut bytes, 0x0020, 0x0013, b"IS", b"1\0");
    }

    write_element(&mut bytes, 0x0028, 0x0002, b"US", &1u16.to_le_bytes());
    write_element(&mut bytes, 0x0028, 0x0004, b"CS", b"MONOCHROME2 ");
    write_element(&mut bytes, 0x0028, 0x0010, b"US", &height.to_le_bytes());
    write_element(&mut bytes, 0x0028, 0x0011, b"US", &width.to_le_bytes());
    write_element(&mut bytes, 0x0028, 0x0100, b"US", &bits.to_le_bytes());
    write_element(&mut bytes, 0x0028, 0x0101, b"US", &bits.to_le_bytes());
    write_element(&mut bytes, 0x0028, 0x0102, b"US", &(bits - 1).to_le_bytes());
    write_element(&mut bytes, 0x0028, 0x0103, b"US", &0u16.to_le_bytes());

    write_element(&mut bytes, 0x7FE0, 0x0010, b"OB", pixel_data);

    bytes
  }

  fn write_element(
    bytes: &mut Vec<u8>,
    group: u16,
    element: u16,
    vr: &[u8; 2],
    value: &[u8],
  ) {
    bytes.extend_from_slice(&group.to_le_bytes());
    bytes.extend_from_slice(&element.to_le_bytes());
    bytes.extend_from_slice(vr);

    if vr == b"OB" {
      bytes.extend_from_slice(&[0, 0]);
      bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
    } else {
      bytes.extend_from_slice(&(value.len() as u16).to_le_bytes());
    }

    bytes.extend_from_slice(value);
  }

  const RAMP_PIXELS: [u8; 16] = [
    0x00, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90, 0xA0, 0xB0,
    0xC0, 0xD0, 0xE0, 0xF0,
  ];

  fn ramp_dicom() -> Vec<u8> {
    build_native_dicom(4, 4, 8, "CT", &RAMP_PIXELS, false)
  }

  #[test]
  fn jpeg_2000_lossless_end_to_end() {
    let config =
      CompressionConfig::new(CodecKind::Jpeg2000, CompressionMode::Lossless);
    let result = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap();

    assert_eq!(result.transfer_syntax_uid, "1.2.840.10008.1.2.4.90");
    assert!(result.is_lossless);

    let output = parse_dicom(result.output_bytes.as_ref().unwrap()).unwrap();
    let fragment = output.first_pixel_data_fragment().unwrap();

    assert_eq!(&fragment[0..4], &[0xFF, 0x4F, 0xFF, 0x51]);
    assert_eq!(&fragment[fragment.len() - 2..], &[0xFF, 0xD9]);

    let decoded = pipeline::decompress(fragment, 4, 4, 8, 1).unwrap();
    assert_eq!(decoded.data, RAMP_PIXELS);
  }

  #[test]
  fn jpeg_ls_lossless_end_to_end() {
    let config =
      CompressionConfig::new(CodecKind::JpegLs, CompressionMode::Lossless);
    let result = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap();

    assert_eq!(result.transfer_syntax_uid, "1.2.840.10008.1.2.4.80");

    let output = parse_dicom(result.output_bytes.as_ref().unwrap()).unwrap();
    let fragment = output.first_pixel_data_fragment().unwrap();

    assert_eq!(&fragment[0..4], &[0xFF, 0xD8, 0xFF, 0xF7]);

    let decoded = pipeline::decompress(fragment, 4, 4, 8, 1).unwrap();
    assert_eq!(decoded.data, RAMP_PIXELS);
  }

  #[test]
  fn jpeg_ls_near_lossless_end_to_end() {
    let mut config =
      CompressionConfig::new(CodecKind::JpegLs, CompressionMode::NearLossless);
    config.near_lossless = 2;
    config.verify_roundtrip = true;

    let result = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap();

    assert_eq!(result.transfer_syntax_uid, "1.2.840.10008.1.2.4.81");
    assert!(!result.is_lossless);

    let output = parse_dicom(result.output_bytes.as_ref().unwrap()).unwrap();
    let fragment = output.first_pixel_data_fragment().unwrap();

    let decoded = pipeline::decompress(fragment, 4, 4, 8, 1).unwrap();
    for (reconstructed, original) in
      decoded.data.iter().zip(RAMP_PIXELS.iter())
    {
      assert!((i16::from(*reconstructed) - i16::from(*original)).abs() <= 2);
    }
  }

  #[test]
  fn uncompressed_end_to_end() {
    let config = CompressionConfig::new(
      CodecKind::Uncompressed,
      CompressionMode::Lossless,
    );
    let result = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap();

    assert_eq!(result.transfer_syntax_uid, "1.2.840.10008.1.2.1");

    let output = parse_dicom(result.output_bytes.as_ref().unwrap()).unwrap();
    let fragment = output.first_pixel_data_fragment().unwrap();

    assert_eq!(fragment, RAMP_PIXELS);
  }

  #[test]
  fn mammography_requires_lossless() {
    let dicom = build_native_dicom(4, 4, 8, "MG", &RAMP_PIXELS, false);

    let config =
      CompressionConfig::new(CodecKind::Jpeg2000, CompressionMode::Lossy);
    let error = pipeline::compress_bytes(&dicom, &config).unwrap_err();

    assert!(matches!(error, CompressError::Validation { .. }));
    assert!(error.details().contains("MG"));
    assert!(error.details().contains("lossless"));
  }

  #[test]
  fn mammography_safety_override_adds_warning() {
    let dicom = build_native_dicom(4, 4, 8, "MG", &RAMP_PIXELS, false);

    let mut config =
      CompressionConfig::new(CodecKind::Jpeg2000, CompressionMode::Lossy);
    config.override_safety = true;

    let result = pipeline::compress_bytes(&dicom, &config).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("MG"));
  }

  #[test]
  fn pipeline_rejects_images_the_codec_cannot_encode() {
    // Signed pixel data on the unsigned-only JPEG-LS codec
    let mut dicom = build_native_dicom(4, 4, 8, "CT", &RAMP_PIXELS, false);

    let pixel_representation = [0x28u8, 0x00, 0x03, 0x01];
    let position = dicom
      .windows(4)
      .position(|window| window == pixel_representation)
      .unwrap();
    dicom[position + 8] = 1;

    let config =
      CompressionConfig::new(CodecKind::JpegLs, CompressionMode::Lossless);
    let error = pipeline::compress_bytes(&dicom, &config).unwrap_err();

    assert!(matches!(error, CompressError::Pipeline { .. }));
  }

  #[test]
  fn pipeline_rejects_modes_without_a_transfer_syntax() {
    let config = CompressionConfig::new(
      CodecKind::Uncompressed,
      CompressionMode::Lossy,
    );

    let error = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap_err();

    assert!(matches!(error, CompressError::Pipeline { .. }));
  }

  #[test]
  fn lossless_verification_passes_for_all_codecs() {
    for codec in
      [CodecKind::Jpeg2000, CodecKind::JpegLs, CodecKind::Uncompressed]
    {
      let mut config =
        CompressionConfig::new(codec, CompressionMode::Lossless);
      config.verify_roundtrip = true;

      assert!(pipeline::compress_bytes(&ramp_dicom(), &config).is_ok());
    }
  }

  #[test]
  fn compress_file_writes_the_output_path() {
    let input_file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(input_file.path(), ramp_dicom()).unwrap();

    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("compressed.dcm");

    let config =
      CompressionConfig::new(CodecKind::JpegLs, CompressionMode::Lossless);
    let result =
      pipeline::compress_file(input_file.path(), &config, Some(&output_path))
        .unwrap();

    assert_eq!(result.output_path.as_deref(), Some(output_path.as_path()));
    assert_eq!(result.output_bytes, None);

    let written = std::fs::read(&output_path).unwrap();
    assert_eq!(written.len() as u64, result.compressed_size);

    let output = parse_dicom(&written).unwrap();
    assert_eq!(output.transfer_syntax_uid(), "1.2.840.10008.1.2.4.80");
  }

  #[test]
  fn compression_ratio_relates_sizes() {
    let config =
      CompressionConfig::new(CodecKind::Jpeg2000, CompressionMode::Lossless);
    let result = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap();

    let product = result.ratio() * result.compressed_size as f64;
    assert!((product - result.original_size as f64).abs() < 1e-6);
  }

  #[test]
  fn constant_image_compresses_against_typical_metadata() {
    let pixels = vec![128u8; 256 * 256];
    let dicom = build_native_dicom(256, 256, 8, "CT", &pixels, true);

    for codec in [CodecKind::Jpeg2000, CodecKind::JpegLs] {
      let config = CompressionConfig::new(codec, CompressionMode::Lossless);
      let result = pipeline::compress_bytes(&dicom, &config).unwrap();

      assert!(result.ratio() >= 1.0);
      assert!(result.savings_percent() >= 0.0);

      let output = parse_dicom(result.output_bytes.as_ref().unwrap()).unwrap();
      let fragment = output.first_pixel_data_fragment().unwrap();
      let decoded = pipeline::decompress(fragment, 256, 256, 8, 1).unwrap();

      assert_eq!(decoded.data, pixels);
    }
  }

  #[test]
  fn config_derived_transfer_syntax_losslessness_matches_mode() {
    let cases = [
      (CodecKind::Jpeg2000, CompressionMode::Lossless),
      (CodecKind::Jpeg2000, CompressionMode::Lossy),
      (CodecKind::JpegLs, CompressionMode::Lossless),
      (CodecKind::JpegLs, CompressionMode::NearLossless),
      (CodecKind::Uncompressed, CompressionMode::Lossless),
    ];

    for (codec, mode) in cases {
      let mut config = CompressionConfig::new(codec, mode);
      config.near_lossless =
        if mode == CompressionMode::NearLossless { 1 } else { 0 };

      let result = pipeline::compress_bytes(&ramp_dicom(), &config).unwrap();

      assert_eq!(
        transfer_syntax::is_lossless(&result.transfer_syntax_uid),
        mode == CompressionMode::Lossless
      );
    }
  }
}
