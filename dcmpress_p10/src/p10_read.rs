//! Parses DICOM P10 bytes into a [`DicomInstance`].

use dcmpress_core::{CompressError, DataElementTag, dictionary};

use crate::dicom_instance::{DicomInstance, trim_string_value};
use crate::internal::byte_reader::ByteReader;
use crate::value_representation::{ValueLengthSize, ValueRepresentation};

/// The value length that marks a data element as having undefined length.
///
const UNDEFINED_LENGTH: u32 = 0xFFFF_FFFF;

/// The little-endian byte pattern of a `(FFFE,E0DD)` sequence delimitation
/// item's tag.
///
const SEQUENCE_DELIMITER_PATTERN: [u8; 4] = [0xFE, 0xFF, 0xDD, 0xE0];

/// Parses a complete DICOM P10 file held in memory.
///
/// The File Meta Information group and the data set are both read under the
/// explicit VR little endian assumption. Parsing is best-effort: a truncated
/// or malformed tail stops the element loop cleanly and the instance holds
/// whatever elements were read up to that point. A missing `DICM` prefix is
/// fatal.
///
pub fn parse_bytes(bytes: &[u8]) -> Result<DicomInstance, CompressError> {
  if bytes.len() < 132 {
    return Err(CompressError::new_invalid_format(format!(
      "File is {} bytes long, shorter than the minimum of 132 for DICOM P10 \
       data",
      bytes.len()
    )));
  }

  if bytes[128..132] != *b"DICM" {
    return Err(CompressError::new_invalid_format(
      "Missing 'DICM' prefix at offset 128",
    ));
  }

  let mut reader = ByteReader::new(bytes, 132);
  let mut instance = DicomInstance::default();

  while !reader.is_at_end() {
    let Ok(group) = reader.read_u16() else { break };
    let Ok(element) = reader.read_u16() else { break };
    let tag = DataElementTag::new(group, element);

    // Item and delimiter tags at the top level have no VR and carry no data
    // of interest
    if tag.is_item_or_delimiter() {
      let Ok(length) = reader.read_u32() else { break };

      if length != UNDEFINED_LENGTH && reader.skip(length as usize).is_err() {
        break;
      }

      continue;
    }

    let Ok(vr_bytes) = reader.read_bytes(2) else { break };
    let Ok(vr) = ValueRepresentation::from_bytes(vr_bytes) else { break };

    let length = match vr.value_length_size() {
      ValueLengthSize::U16 => match reader.read_u16() {
        Ok(length) => u32::from(length),
        Err(_) => break,
      },
      ValueLengthSize::U32 => {
        if reader.skip(2).is_err() {
          break;
        }

        match reader.read_u32() {
          Ok(length) => length,
          Err(_) => break,
        }
      }
    };

    if length == UNDEFINED_LENGTH {
      if !read_undefined_length_element(&mut reader, tag, &mut instance) {
        break;
      }

      continue;
    }

    // Stop on an element that would overrun the buffer
    let Ok(value) = reader.read_bytes(length as usize) else { break };

    store_element(&mut instance, tag, value);
  }

  Ok(instance)
}

/// Handles an element with undefined length. For the pixel data element the
/// enclosed item sequence is captured verbatim as the instance's encapsulated
/// payload; every other undefined-length element is skipped without parsing
/// its sequence.
///
/// Returns false when the end of the element cannot be found, which ends the
/// best-effort parse.
///
fn read_undefined_length_element(
  reader: &mut ByteReader,
  tag: DataElementTag,
  instance: &mut DicomInstance,
) -> bool {
  if tag == dictionary::PIXEL_DATA {
    return read_encapsulated_pixel_data(reader, instance);
  }

  // The sequence's content is not parsed, so its end is found by scanning for
  // the raw bytes of its sequence delimitation item's tag
  let Some(delimiter_offset) = reader.find(&SEQUENCE_DELIMITER_PATTERN) else {
    return false;
  };

  reader.seek(delimiter_offset + 8);

  true
}

/// Captures the item sequence of an encapsulated pixel data element by
/// walking its item headers, which is exact even when fragment payloads
/// happen to contain delimiter-like bytes. Items with odd declared lengths
/// are followed by a single pad byte.
///
fn read_encapsulated_pixel_data(
  reader: &mut ByteReader,
  instance: &mut DicomInstance,
) -> bool {
  let payload_start = reader.offset();

  loop {
    let payload_end = reader.offset();

    let Ok(group) = reader.read_u16() else { return false };
    let Ok(element) = reader.read_u16() else { return false };
    let Ok(length) = reader.read_u32() else { return false };

    match DataElementTag::new(group, element) {
      dictionary::ITEM => {
        let item_length = length as usize + length as usize % 2;

        if reader.skip(item_length).is_err() {
          return false;
        }
      }

      dictionary::SEQUENCE_DELIMITATION_ITEM => {
        let payload = reader.bytes_between(payload_start, payload_end);

        instance.pixel_data = payload.to_vec();
        instance.is_pixel_data_encapsulated = true;

        return true;
      }

      _ => return false,
    }
  }
}

/// Records a data element's raw bytes and decodes it into the matching typed
/// attribute when the tag is one of the known image attributes.
///
fn store_element(
  instance: &mut DicomInstance,
  tag: DataElementTag,
  value: &[u8],
) {
  match tag {
    dictionary::TRANSFER_SYNTAX_UID => {
      instance.transfer_syntax_uid = trim_string_value(value);
    }

    // The media storage UIDs seed the SOP UIDs, which the matching data set
    // elements overwrite when present
    dictionary::MEDIA_STORAGE_SOP_CLASS_UID | dictionary::SOP_CLASS_UID => {
      instance.sop_class_uid = trim_string_value(value);
    }
    dictionary::MEDIA_STORAGE_SOP_INSTANCE_UID
    | dictionary::SOP_INSTANCE_UID => {
      instance.sop_instance_uid = trim_string_value(value);
    }

    dictionary::MODALITY => instance.modality = trim_string_value(value),

    dictionary::PHOTOMETRIC_INTERPRETATION => {
      instance.photometric_interpretation = trim_string_value(value);
    }

    dictionary::SAMPLES_PER_PIXEL => {
      instance.samples_per_pixel = read_u16_value(value);
    }
    dictionary::ROWS => instance.rows = read_u16_value(value),
    dictionary::COLUMNS => instance.columns = read_u16_value(value),
    dictionary::BITS_ALLOCATED => {
      instance.bits_allocated = read_u16_value(value);
    }
    dictionary::BITS_STORED => instance.bits_stored = read_u16_value(value),
    dictionary::HIGH_BIT => instance.high_bit = read_u16_value(value),
    dictionary::PIXEL_REPRESENTATION => {
      instance.pixel_representation = read_u16_value(value);
    }

    dictionary::PIXEL_DATA => {
      instance.pixel_data = value.to_vec();
      instance.is_pixel_data_encapsulated = false;
    }

    _ => (),
  }

  instance.elements.insert(tag, value.to_vec());
}

fn read_u16_value(value: &[u8]) -> u16 {
  if value.len() < 2 {
    return 0;
  }

  u16::from_le_bytes([value[0], value[1]])
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_element(bytes: &mut Vec<u8>, tag: DataElementTag, vr: &[u8; 2], value: &[u8]) {
    bytes.extend_from_slice(&tag.group.to_le_bytes());
    bytes.extend_from_slice(&tag.element.to_le_bytes());
    bytes.extend_from_slice(vr);

    match vr {
      b"OB" | b"OW" | b"SQ" | b"UN" => {
        bytes.extend_from_slice(&[0, 0]);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
      }
      _ => bytes.extend_from_slice(&(value.len() as u16).to_le_bytes()),
    }

    bytes.extend_from_slice(value);
  }

  fn synthetic_file() -> Vec<u8> {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");

    write_element(
      &mut bytes,
      dictionary::TRANSFER_SYNTAX_UID,
      b"UI",
      b"1.2.840.10008.1.2.1\0",
    );
    write_element(&mut bytes, dictionary::SOP_CLASS_UID, b"UI", b"1.2.3.4\0");
    write_element(&mut bytes, dictionary::MODALITY, b"CS", b"CT");
    write_element(&mut bytes, dictionary::SAMPLES_PER_PIXEL, b"US", &[1, 0]);
    write_element(
      &mut bytes,
      dictionary::PHOTOMETRIC_INTERPRETATION,
      b"CS",
      b"MONOCHROME2 ",
    );
    write_element(&mut bytes, dictionary::ROWS, b"US", &[2, 0]);
    write_element(&mut bytes, dictionary::COLUMNS, b"US", &[2, 0]);
    write_element(&mut bytes, dictionary::BITS_ALLOCATED, b"US", &[8, 0]);
    write_element(&mut bytes, dictionary::BITS_STORED, b"US", &[8, 0]);
    write_element(&mut bytes, dictionary::HIGH_BIT, b"US", &[7, 0]);
    write_element(&mut bytes, dictionary::PIXEL_REPRESENTATION, b"US", &[0, 0]);
    write_element(&mut bytes, dictionary::PIXEL_DATA, b"OB", &[1, 2, 3, 4]);

    bytes
  }

  #[test]
  fn too_short_input_test() {
    assert!(matches!(
      parse_bytes(&[0; 16]),
      Err(CompressError::InvalidFormat { .. })
    ));
  }

  #[test]
  fn missing_prefix_test() {
    assert!(matches!(
      parse_bytes(&[0; 200]),
      Err(CompressError::InvalidFormat { .. })
    ));
  }

  #[test]
  fn parse_synthetic_file_test() {
    let instance = parse_bytes(&synthetic_file()).unwrap();

    assert_eq!(instance.transfer_syntax_uid(), "1.2.840.10008.1.2.1");
    assert_eq!(instance.sop_class_uid(), "1.2.3.4");
    assert_eq!(instance.modality(), "CT");
    assert_eq!(instance.rows(), 2);
    assert_eq!(instance.columns(), 2);
    assert_eq!(instance.bits_allocated(), 8);
    assert_eq!(instance.bits_stored(), 8);
    assert_eq!(instance.high_bit(), 7);
    assert_eq!(instance.photometric_interpretation(), "MONOCHROME2");
    assert_eq!(instance.pixel_data(), &[1, 2, 3, 4]);
    assert!(!instance.is_pixel_data_encapsulated());

    let image = instance.get_image_data().unwrap();
    assert_eq!(image.width, 2);
    assert_eq!(image.height, 2);
    assert_eq!(image.bits_per_sample, 8);
  }

  #[test]
  fn truncated_tail_is_ignored_test() {
    let mut bytes = synthetic_file();

    // A valid header claiming more data than the buffer holds
    write_element(&mut bytes, DataElementTag::new(0x0010, 0x0010), b"PN", b"");
    let length = bytes.len();
    bytes[length - 2] = 0xFF;

    let instance = parse_bytes(&bytes).unwrap();
    assert_eq!(instance.rows(), 2);
  }

  #[test]
  fn undefined_length_element_is_skipped_test() {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");

    // An undefined-length sequence that is not pixel data
    bytes.extend_from_slice(&[0x08, 0x00, 0x15, 0x11]);
    bytes.extend_from_slice(b"SQ");
    bytes.extend_from_slice(&[0, 0]);
    bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    bytes.extend_from_slice(&[0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]);

    write_element(&mut bytes, dictionary::ROWS, b"US", &[32, 0]);

    let instance = parse_bytes(&bytes).unwrap();
    assert_eq!(instance.rows(), 32);
    assert_eq!(
      instance.get_element_bytes(DataElementTag::new(0x0008, 0x1115)),
      None
    );
  }

  #[test]
  fn encapsulated_pixel_data_is_captured_test() {
    let mut bytes = vec![0u8; 128];
    bytes.extend_from_slice(b"DICM");

    write_element(
      &mut bytes,
      dictionary::TRANSFER_SYNTAX_UID,
      b"UI",
      b"1.2.840.10008.1.2.4.90",
    );

    bytes.extend_from_slice(&[0xE0, 0x7F, 0x10, 0x00]);
    bytes.extend_from_slice(b"OB");
    bytes.extend_from_slice(&[0, 0]);
    bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());

    // Empty basic offset table, then one fragment of four bytes
    bytes.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0]);
    bytes.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 4, 0, 0, 0]);
    bytes.extend_from_slice(&[9, 8, 7, 6]);
    bytes.extend_from_slice(&[0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]);

    let instance = parse_bytes(&bytes).unwrap();

    assert!(instance.is_pixel_data_encapsulated());
    assert_eq!(
      instance.first_pixel_data_fragment(),
      Ok([9, 8, 7, 6].as_slice())
    );
  }
}
