//! The parsed view of a DICOM P10 file.

use std::collections::BTreeMap;

use byteorder::{ByteOrder, LittleEndian};

use dcmpress_core::{CompressError, DataElementTag, ImageData, dictionary};

/// A parsed DICOM instance: the image attributes used by the compression
/// pipeline, the pixel data payload, and a map of every data element that was
/// read, stored verbatim.
///
/// Instances are created by [`crate::p10_read::parse_bytes`] and are read-only
/// thereafter.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DicomInstance {
  pub(crate) elements: BTreeMap<DataElementTag, Vec<u8>>,

  pub(crate) transfer_syntax_uid: String,
  pub(crate) sop_class_uid: String,
  pub(crate) sop_instance_uid: String,
  pub(crate) modality: String,

  pub(crate) rows: u16,
  pub(crate) columns: u16,
  pub(crate) bits_allocated: u16,
  pub(crate) bits_stored: u16,
  pub(crate) high_bit: u16,
  pub(crate) pixel_representation: u16,
  pub(crate) samples_per_pixel: u16,
  pub(crate) photometric_interpretation: String,

  pub(crate) pixel_data: Vec<u8>,
  pub(crate) is_pixel_data_encapsulated: bool,
}

impl DicomInstance {
  pub fn transfer_syntax_uid(&self) -> &str {
    &self.transfer_syntax_uid
  }

  pub fn sop_class_uid(&self) -> &str {
    &self.sop_class_uid
  }

  pub fn sop_instance_uid(&self) -> &str {
    &self.sop_instance_uid
  }

  pub fn modality(&self) -> &str {
    &self.modality
  }

  pub fn rows(&self) -> u16 {
    self.rows
  }

  pub fn columns(&self) -> u16 {
    self.columns
  }

  pub fn bits_allocated(&self) -> u16 {
    self.bits_allocated
  }

  pub fn bits_stored(&self) -> u16 {
    self.bits_stored
  }

  pub fn high_bit(&self) -> u16 {
    self.high_bit
  }

  pub fn pixel_representation(&self) -> u16 {
    self.pixel_representation
  }

  pub fn samples_per_pixel(&self) -> u16 {
    self.samples_per_pixel
  }

  pub fn photometric_interpretation(&self) -> &str {
    &self.photometric_interpretation
  }

  /// The pixel data payload: a contiguous run of raw samples for native
  /// transfer syntaxes, or the raw item sequence of the encapsulated pixel
  /// data element for compressed transfer syntaxes.
  ///
  pub fn pixel_data(&self) -> &[u8] {
    &self.pixel_data
  }

  /// Returns whether the pixel data payload is an encapsulated item sequence.
  ///
  pub fn is_pixel_data_encapsulated(&self) -> bool {
    self.is_pixel_data_encapsulated
  }

  /// Returns the raw bytes of the data element with the given tag, if it was
  /// present in the file.
  ///
  pub fn get_element_bytes(&self, tag: DataElementTag) -> Option<&[u8]> {
    self.elements.get(&tag).map(|bytes| bytes.as_slice())
  }

  /// Returns the value of a string data element with trailing nulls and
  /// spaces trimmed.
  ///
  pub fn get_string(&self, tag: DataElementTag) -> Option<String> {
    self
      .get_element_bytes(tag)
      .map(|bytes| trim_string_value(bytes))
  }

  /// Returns the value of an unsigned short data element.
  ///
  pub fn get_u16(&self, tag: DataElementTag) -> Option<u16> {
    match self.get_element_bytes(tag) {
      Some(bytes) if bytes.len() >= 2 => Some(LittleEndian::read_u16(bytes)),
      _ => None,
    }
  }

  /// Builds an [`ImageData`] from the instance's parsed attributes and its
  /// native pixel data payload.
  ///
  /// The sample precision is taken from bits stored when it is non-zero,
  /// otherwise from bits allocated.
  ///
  pub fn get_image_data(&self) -> Result<ImageData, CompressError> {
    if self.pixel_data.is_empty() {
      return Err(CompressError::new_dicom_parse("no pixel data"));
    }

    if self.is_pixel_data_encapsulated {
      return Err(CompressError::new_dicom_parse(
        "pixel data is encapsulated and must be decompressed first",
      ));
    }

    let bits_per_sample = if self.bits_stored > 0 {
      self.bits_stored
    } else {
      self.bits_allocated
    };

    let samples_per_pixel = self.samples_per_pixel.max(1);

    ImageData::new(
      self.columns,
      self.rows,
      bits_per_sample,
      samples_per_pixel,
      self.pixel_representation == 1,
      self.photometric_interpretation.clone(),
      self.pixel_data.clone(),
    )
  }

  /// Returns the first pixel data fragment of an encapsulated payload: the
  /// bytes of the first item after the basic offset table.
  ///
  /// For a native payload the whole contiguous run is returned.
  ///
  pub fn first_pixel_data_fragment(&self) -> Result<&[u8], CompressError> {
    if !self.is_pixel_data_encapsulated {
      return Ok(&self.pixel_data);
    }

    let mut offset = 0;
    let mut is_first_item = true;

    while offset + 8 <= self.pixel_data.len() {
      let group = LittleEndian::read_u16(&self.pixel_data[offset..]);
      let element = LittleEndian::read_u16(&self.pixel_data[offset + 2..]);
      let length =
        LittleEndian::read_u32(&self.pixel_data[offset + 4..]) as usize;

      if DataElementTag::new(group, element) != dictionary::ITEM {
        break;
      }

      offset += 8;

      if offset + length > self.pixel_data.len() {
        break;
      }

      // The first item is the basic offset table, which indexes frames and
      // carries no pixel data
      if is_first_item {
        is_first_item = false;
      } else {
        return Ok(&self.pixel_data[offset..offset + length]);
      }

      // Items are padded to even length
      offset += length + length % 2;
    }

    Err(CompressError::new_dicom_parse(
      "encapsulated pixel data contains no fragment",
    ))
  }
}

/// Decodes a string data element value, trimming the trailing null and space
/// padding that DICOM uses to reach even value lengths.
///
pub(crate) fn trim_string_value(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes)
    .trim_end_matches(['\0', ' '])
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trim_string_value_test() {
    assert_eq!(trim_string_value(b"MONOCHROME2\0"), "MONOCHROME2");
    assert_eq!(trim_string_value(b"CT "), "CT");
    assert_eq!(trim_string_value(b""), "");
  }

  #[test]
  fn get_image_data_requires_pixel_data() {
    let instance = DicomInstance::default();

    assert_eq!(
      instance.get_image_data(),
      Err(CompressError::new_dicom_parse("no pixel data"))
    );
  }

  #[test]
  fn first_pixel_data_fragment_skips_basic_offset_table() {
    let mut payload = vec![];

    // Empty basic offset table item
    payload.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 0, 0, 0, 0]);

    // Fragment item holding three bytes, padded to four
    payload.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 3, 0, 0, 0]);
    payload.extend_from_slice(&[10, 20, 30, 0]);

    let instance = DicomInstance {
      pixel_data: payload,
      is_pixel_data_encapsulated: true,
      ..Default::default()
    };

    assert_eq!(
      instance.first_pixel_data_fragment(),
      Ok([10, 20, 30].as_slice())
    );
  }
}
