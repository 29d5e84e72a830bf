//! Serializes a compressed DICOM instance to DICOM P10 bytes.

use byteorder::{ByteOrder, LittleEndian};

use dcmpress_core::{DataElementTag, TransferSyntax, dictionary};

use crate::dicom_instance::DicomInstance;
use crate::uids;
use crate::value_representation::{ValueLengthSize, ValueRepresentation};

/// Serializes a DICOM P10 file that carries the given already-encoded pixel
/// data under the given transfer syntax, with image attributes taken from the
/// source instance.
///
/// The output is, in order: a 128-byte preamble of zeros, the `DICM` prefix,
/// the File Meta Information group, the image pixel data set elements, and
/// the pixel data as an encapsulated item sequence with an empty basic offset
/// table.
///
pub fn write_bytes(
  source: &DicomInstance,
  pixel_data: &[u8],
  transfer_syntax: &'static TransferSyntax,
) -> Vec<u8> {
  let mut bytes =
    Vec::with_capacity(1024 + pixel_data.len() + pixel_data.len() % 2);

  bytes.extend_from_slice(&[0u8; 128]);
  bytes.extend_from_slice(b"DICM");

  write_file_meta_information(&mut bytes, source, transfer_syntax);
  write_image_data_set(&mut bytes, source);
  write_encapsulated_pixel_data(&mut bytes, pixel_data);

  bytes
}

/// Writes the File Meta Information group. The group length element is
/// emitted first with a placeholder value that is patched once the rest of
/// the group's bytes are known.
///
fn write_file_meta_information(
  bytes: &mut Vec<u8>,
  source: &DicomInstance,
  transfer_syntax: &'static TransferSyntax,
) {
  let group_start = bytes.len();

  bytes.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x55, 0x4C, 0x04, 0x00]);
  bytes.extend_from_slice(&[0, 0, 0, 0]);

  write_element(
    bytes,
    dictionary::FILE_META_INFORMATION_VERSION,
    ValueRepresentation::OtherByteString,
    &[0x00, 0x01],
  );

  write_string_element(
    bytes,
    dictionary::MEDIA_STORAGE_SOP_CLASS_UID,
    ValueRepresentation::UniqueIdentifier,
    source.sop_class_uid(),
  );
  write_string_element(
    bytes,
    dictionary::MEDIA_STORAGE_SOP_INSTANCE_UID,
    ValueRepresentation::UniqueIdentifier,
    source.sop_instance_uid(),
  );
  write_string_element(
    bytes,
    dictionary::TRANSFER_SYNTAX_UID,
    ValueRepresentation::UniqueIdentifier,
    transfer_syntax.uid,
  );
  write_string_element(
    bytes,
    dictionary::IMPLEMENTATION_CLASS_UID,
    ValueRepresentation::UniqueIdentifier,
    uids::IMPLEMENTATION_CLASS_UID,
  );
  write_string_element(
    bytes,
    dictionary::IMPLEMENTATION_VERSION_NAME,
    ValueRepresentation::ShortString,
    uids::IMPLEMENTATION_VERSION_NAME,
  );

  // Patch the group length: the number of bytes following the group length
  // element's value
  let group_length = (bytes.len() - group_start - 12) as u32;
  LittleEndian::write_u32(
    &mut bytes[group_start + 8..group_start + 12],
    group_length,
  );
}

/// Writes the data set elements describing the image: the SOP identifiers,
/// the modality, and the Image Pixel module attributes.
///
fn write_image_data_set(bytes: &mut Vec<u8>, source: &DicomInstance) {
  write_string_element(
    bytes,
    dictionary::SOP_CLASS_UID,
    ValueRepresentation::UniqueIdentifier,
    source.sop_class_uid(),
  );
  write_string_element(
    bytes,
    dictionary::SOP_INSTANCE_UID,
    ValueRepresentation::UniqueIdentifier,
    source.sop_instance_uid(),
  );
  write_string_element(
    bytes,
    dictionary::MODALITY,
    ValueRepresentation::CodeString,
    source.modality(),
  );

  write_u16_element(
    bytes,
    dictionary::SAMPLES_PER_PIXEL,
    source.samples_per_pixel(),
  );
  write_string_element(
    bytes,
    dictionary::PHOTOMETRIC_INTERPRETATION,
    ValueRepresentation::CodeString,
    source.photometric_interpretation(),
  );
  write_u16_element(bytes, dictionary::ROWS, source.rows());
  write_u16_element(bytes, dictionary::COLUMNS, source.columns());
  write_u16_element(bytes, dictionary::BITS_ALLOCATED, source.bits_allocated());
  write_u16_element(bytes, dictionary::BITS_STORED, source.bits_stored());
  write_u16_element(bytes, dictionary::HIGH_BIT, source.high_bit());
  write_u16_element(
    bytes,
    dictionary::PIXEL_REPRESENTATION,
    source.pixel_representation(),
  );
}

/// Writes the `(7FE0,0010)` pixel data element as an encapsulated sequence:
/// an undefined-length OB element holding an empty basic offset table item,
/// one fragment item with the payload, and a sequence delimitation item.
///
/// An odd-length payload is followed by a single zero pad byte so the item
/// ends on an even offset; the item's declared length remains the true
/// payload length.
///
fn write_encapsulated_pixel_data(bytes: &mut Vec<u8>, payload: &[u8]) {
  write_tag(bytes, dictionary::PIXEL_DATA);
  bytes.extend_from_slice(b"OB");
  bytes.extend_from_slice(&[0, 0]);
  bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

  write_item_header(bytes, dictionary::ITEM, 0);

  write_item_header(bytes, dictionary::ITEM, payload.len() as u32);
  bytes.extend_from_slice(payload);
  if payload.len() % 2 == 1 {
    bytes.push(0);
  }

  write_item_header(bytes, dictionary::SEQUENCE_DELIMITATION_ITEM, 0);
}

fn write_tag(bytes: &mut Vec<u8>, tag: DataElementTag) {
  bytes.extend_from_slice(&tag.group.to_le_bytes());
  bytes.extend_from_slice(&tag.element.to_le_bytes());
}

fn write_item_header(bytes: &mut Vec<u8>, tag: DataElementTag, length: u32) {
  write_tag(bytes, tag);
  bytes.extend_from_slice(&length.to_le_bytes());
}

/// Writes a single explicit VR little endian data element. VRs in the 32-bit
/// length group are written with two reserved bytes and a `u32` length; all
/// others use a `u16` length.
///
fn write_element(
  bytes: &mut Vec<u8>,
  tag: DataElementTag,
  vr: ValueRepresentation,
  value: &[u8],
) {
  write_tag(bytes, tag);
  bytes.extend_from_slice(&vr.to_bytes());

  match vr.value_length_size() {
    ValueLengthSize::U16 => {
      bytes.extend_from_slice(&(value.len() as u16).to_le_bytes());
    }
    ValueLengthSize::U32 => {
      bytes.extend_from_slice(&[0, 0]);
      bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
    }
  }

  bytes.extend_from_slice(value);
}

/// Writes a string-valued data element, null-padded to an even value length.
///
fn write_string_element(
  bytes: &mut Vec<u8>,
  tag: DataElementTag,
  vr: ValueRepresentation,
  value: &str,
) {
  if value.len() % 2 == 0 {
    write_element(bytes, tag, vr, value.as_bytes());
  } else {
    let mut padded = Vec::with_capacity(value.len() + 1);
    padded.extend_from_slice(value.as_bytes());
    padded.push(0);

    write_element(bytes, tag, vr, &padded);
  }
}

fn write_u16_element(bytes: &mut Vec<u8>, tag: DataElementTag, value: u16) {
  write_element(
    bytes,
    tag,
    ValueRepresentation::UnsignedShort,
    &value.to_le_bytes(),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use dcmpress_core::transfer_syntax;

  fn source_instance() -> DicomInstance {
    DicomInstance {
      sop_class_uid: "1.2.840.10008.5.1.4.1.1.2".to_string(),
      sop_instance_uid: "1.2.3.4.5".to_string(),
      modality: "CT".to_string(),
      rows: 4,
      columns: 4,
      bits_allocated: 8,
      bits_stored: 8,
      high_bit: 7,
      pixel_representation: 0,
      samples_per_pixel: 1,
      photometric_interpretation: "MONOCHROME2".to_string(),
      ..Default::default()
    }
  }

  #[test]
  fn file_meta_group_length_test() {
    let bytes = write_bytes(
      &source_instance(),
      &[1, 2],
      &transfer_syntax::JPEG_2K_LOSSLESS_ONLY,
    );

    assert_eq!(&bytes[128..132], b"DICM");
    assert_eq!(&bytes[132..140], &[2, 0, 0, 0, 0x55, 0x4C, 4, 0]);

    let group_length = LittleEndian::read_u32(&bytes[140..144]) as usize;

    // The group ends where the first data set element, (0008,0016), begins
    let data_set_start = 144 + group_length;
    assert_eq!(&bytes[data_set_start..data_set_start + 4], &[8, 0, 0x16, 0]);
  }

  #[test]
  fn string_values_are_padded_to_even_length_test() {
    let bytes = write_bytes(
      &source_instance(),
      &[0],
      &transfer_syntax::JPEG_LS_LOSSLESS,
    );

    // "1.2.3.4.5" is nine bytes long so its element declares ten
    let pattern = [0x08u8, 0x00, 0x18, 0x00, 0x55, 0x49, 10, 0];
    let position = bytes
      .windows(pattern.len())
      .position(|window| window == pattern)
      .unwrap();

    assert_eq!(&bytes[position + 8..position + 18], b"1.2.3.4.5\0");
  }

  #[test]
  fn encapsulated_pixel_data_layout_test() {
    let payload = [1u8, 2, 3];
    let bytes = write_bytes(
      &source_instance(),
      &payload,
      &transfer_syntax::JPEG_2K_LOSSLESS_ONLY,
    );

    let header = [
      0xE0u8, 0x7F, 0x10, 0x00, 0x4F, 0x42, 0x00, 0x00, 0xFF, 0xFF, 0xFF,
      0xFF,
    ];
    let position = bytes
      .windows(header.len())
      .position(|window| window == header)
      .unwrap();

    let mut expected = vec![];
    // Empty basic offset table
    expected.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0]);
    // Fragment with a declared length of three, padded to four bytes
    expected.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 3, 0, 0, 0]);
    expected.extend_from_slice(&[1, 2, 3, 0]);
    // Sequence delimitation item
    expected.extend_from_slice(&[0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]);

    assert_eq!(&bytes[position + 12..], expected.as_slice());
  }

  #[test]
  fn write_then_parse_round_trip_test() {
    let payload = [0xAAu8, 0xBB, 0xCC, 0xDD, 0xEE];
    let bytes = write_bytes(
      &source_instance(),
      &payload,
      &transfer_syntax::JPEG_LS_LOSSLESS,
    );

    let parsed = crate::p10_read::parse_bytes(&bytes).unwrap();

    assert_eq!(parsed.transfer_syntax_uid(), "1.2.840.10008.1.2.4.80");
    assert_eq!(parsed.sop_instance_uid(), "1.2.3.4.5");
    assert_eq!(parsed.modality(), "CT");
    assert_eq!(parsed.rows(), 4);
    assert_eq!(parsed.columns(), 4);
    assert!(parsed.is_pixel_data_encapsulated());
    assert_eq!(parsed.first_pixel_data_fragment(), Ok(payload.as_slice()));
  }
}
