//! Defines the DICOM transfer syntaxes recognized by the pixel data pipeline.

/// Describes a single DICOM transfer syntax: its unique identifier, its
/// human-readable name, whether its pixel data is stored encapsulated in an
/// item sequence, and whether it preserves pixel data bit-exactly.
///
#[derive(Debug, PartialEq)]
pub struct TransferSyntax {
  pub name: &'static str,
  pub uid: &'static str,
  pub is_encapsulated: bool,
  pub is_lossless: bool,
}

impl core::fmt::Display for TransferSyntax {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    write!(f, "{}", self.name)
  }
}

pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
  name: "Implicit VR Little Endian",
  uid: "1.2.840.10008.1.2",
  is_encapsulated: false,
  is_lossless: true,
};

pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
  name: "Explicit VR Little Endian",
  uid: "1.2.840.10008.1.2.1",
  is_encapsulated: false,
  is_lossless: true,
};

pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax {
  name: "Explicit VR Big Endian",
  uid: "1.2.840.10008.1.2.2",
  is_encapsulated: false,
  is_lossless: true,
};

pub const JPEG_LOSSLESS: TransferSyntax = TransferSyntax {
  name: "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
  uid: "1.2.840.10008.1.2.4.70",
  is_encapsulated: true,
  is_lossless: true,
};

pub const JPEG_LS_LOSSLESS: TransferSyntax = TransferSyntax {
  name: "JPEG-LS Lossless",
  uid: "1.2.840.10008.1.2.4.80",
  is_encapsulated: true,
  is_lossless: true,
};

pub const JPEG_LS_NEAR_LOSSLESS: TransferSyntax = TransferSyntax {
  name: "JPEG-LS Lossy (Near-Lossless)",
  uid: "1.2.840.10008.1.2.4.81",
  is_encapsulated: true,
  is_lossless: false,
};

pub const JPEG_2K_LOSSLESS_ONLY: TransferSyntax = TransferSyntax {
  name: "JPEG 2000 (Lossless Only)",
  uid: "1.2.840.10008.1.2.4.90",
  is_encapsulated: true,
  is_lossless: true,
};

pub const JPEG_2K: TransferSyntax = TransferSyntax {
  name: "JPEG 2000",
  uid: "1.2.840.10008.1.2.4.91",
  is_encapsulated: true,
  is_lossless: false,
};

pub const RLE_LOSSLESS: TransferSyntax = TransferSyntax {
  name: "RLE Lossless",
  uid: "1.2.840.10008.1.2.5",
  is_encapsulated: true,
  is_lossless: true,
};

/// All transfer syntaxes in the registry, ordered by UID.
///
pub const ALL: [&TransferSyntax; 9] = [
  &IMPLICIT_VR_LITTLE_ENDIAN,
  &EXPLICIT_VR_LITTLE_ENDIAN,
  &EXPLICIT_VR_BIG_ENDIAN,
  &JPEG_LOSSLESS,
  &JPEG_LS_LOSSLESS,
  &JPEG_LS_NEAR_LOSSLESS,
  &JPEG_2K_LOSSLESS_ONLY,
  &JPEG_2K,
  &RLE_LOSSLESS,
];

impl TransferSyntax {
  /// Returns the transfer syntax in the registry with the given UID.
  ///
  #[allow(clippy::result_unit_err)]
  pub fn from_uid(uid: &str) -> Result<&'static TransferSyntax, ()> {
    ALL
      .iter()
      .find(|transfer_syntax| transfer_syntax.uid == uid)
      .copied()
      .ok_or(())
  }
}

/// Returns the human-readable name for a transfer syntax UID, if it is in the
/// registry.
///
pub fn name_of(uid: &str) -> Option<&'static str> {
  TransferSyntax::from_uid(uid)
    .map(|transfer_syntax| transfer_syntax.name)
    .ok()
}

/// Returns whether the transfer syntax with the given UID preserves pixel data
/// bit-exactly. Unknown UIDs are reported as not lossless.
///
pub fn is_lossless(uid: &str) -> bool {
  TransferSyntax::from_uid(uid)
    .map(|transfer_syntax| transfer_syntax.is_lossless)
    .unwrap_or(false)
}
