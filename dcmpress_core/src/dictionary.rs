//! Data element tags for the subset of the DICOM data dictionary used by the
//! pixel data pipeline.

use crate::DataElementTag;

pub const FILE_META_INFORMATION_GROUP_LENGTH: DataElementTag =
  DataElementTag::new(0x0002, 0x0000);

pub const FILE_META_INFORMATION_VERSION: DataElementTag =
  DataElementTag::new(0x0002, 0x0001);

pub const MEDIA_STORAGE_SOP_CLASS_UID: DataElementTag =
  DataElementTag::new(0x0002, 0x0002);

pub const MEDIA_STORAGE_SOP_INSTANCE_UID: DataElementTag =
  DataElementTag::new(0x0002, 0x0003);

pub const TRANSFER_SYNTAX_UID: DataElementTag =
  DataElementTag::new(0x0002, 0x0010);

pub const IMPLEMENTATION_CLASS_UID: DataElementTag =
  DataElementTag::new(0x0002, 0x0012);

pub const IMPLEMENTATION_VERSION_NAME: DataElementTag =
  DataElementTag::new(0x0002, 0x0013);

pub const SOP_CLASS_UID: DataElementTag = DataElementTag::new(0x0008, 0x0016);

pub const SOP_INSTANCE_UID: DataElementTag =
  DataElementTag::new(0x0008, 0x0018);

pub const MODALITY: DataElementTag = DataElementTag::new(0x0008, 0x0060);

pub const SAMPLES_PER_PIXEL: DataElementTag =
  DataElementTag::new(0x0028, 0x0002);

pub const PHOTOMETRIC_INTERPRETATION: DataElementTag =
  DataElementTag::new(0x0028, 0x0004);

pub const ROWS: DataElementTag = DataElementTag::new(0x0028, 0x0010);

pub const COLUMNS: DataElementTag = DataElementTag::new(0x0028, 0x0011);

pub const BITS_ALLOCATED: DataElementTag =
  DataElementTag::new(0x0028, 0x0100);

pub const BITS_STORED: DataElementTag = DataElementTag::new(0x0028, 0x0101);

pub const HIGH_BIT: DataElementTag = DataElementTag::new(0x0028, 0x0102);

pub const PIXEL_REPRESENTATION: DataElementTag =
  DataElementTag::new(0x0028, 0x0103);

pub const PIXEL_DATA: DataElementTag = DataElementTag::new(0x7FE0, 0x0010);

pub const ITEM: DataElementTag = DataElementTag::new(0xFFFE, 0xE000);

pub const ITEM_DELIMITATION_ITEM: DataElementTag =
  DataElementTag::new(0xFFFE, 0xE00D);

pub const SEQUENCE_DELIMITATION_ITEM: DataElementTag =
  DataElementTag::new(0xFFFE, 0xE0DD);
