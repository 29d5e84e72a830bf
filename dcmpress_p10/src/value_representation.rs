//! DICOM value representations and their P10 serialization properties.

/// A DICOM value representation (VR), stored in DICOM P10 as two ASCII bytes
/// in every explicit-VR transfer syntax.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueRepresentation {
  AgeString,
  ApplicationEntity,
  AttributeTag,
  CodeString,
  Date,
  DateTime,
  DecimalString,
  FloatingPointDouble,
  FloatingPointSingle,
  IntegerString,
  LongString,
  LongText,
  OtherByteString,
  OtherDoubleString,
  OtherFloatString,
  OtherLongString,
  OtherVeryLongString,
  OtherWordString,
  PersonName,
  Sequence,
  ShortString,
  ShortText,
  SignedLong,
  SignedShort,
  SignedVeryLong,
  Time,
  UniqueIdentifier,
  UniversalResourceIdentifier,
  Unknown,
  UnlimitedCharacters,
  UnlimitedText,
  UnsignedLong,
  UnsignedShort,
  UnsignedVeryLong,
}

/// The two possibilities for the size of the value length for a VR stored in
/// the DICOM P10 format.
///
pub enum ValueLengthSize {
  U16,
  U32,
}

impl core::fmt::Display for ValueRepresentation {
  fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
    let bytes = self.to_bytes();
    let code = core::str::from_utf8(&bytes).unwrap();

    write!(f, "{code}")
  }
}

impl ValueRepresentation {
  /// Converts the two ASCII bytes of a P10 data element header to a VR.
  ///
  #[allow(clippy::result_unit_err)]
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, ()> {
    match bytes {
      b"AE" => Ok(Self::ApplicationEntity),
      b"AS" => Ok(Self::AgeString),
      b"AT" => Ok(Self::AttributeTag),
      b"CS" => Ok(Self::CodeString),
      b"DA" => Ok(Self::Date),
      b"DS" => Ok(Self::DecimalString),
      b"DT" => Ok(Self::DateTime),
      b"FD" => Ok(Self::FloatingPointDouble),
      b"FL" => Ok(Self::FloatingPointSingle),
      b"IS" => Ok(Self::IntegerString),
      b"LO" => Ok(Self::LongString),
      b"LT" => Ok(Self::LongText),
      b"OB" => Ok(Self::OtherByteString),
      b"OD" => Ok(Self::OtherDoubleString),
      b"OF" => Ok(Self::OtherFloatString),
      b"OL" => Ok(Self::OtherLongString),
      b"OV" => Ok(Self::OtherVeryLongString),
      b"OW" => Ok(Self::OtherWordString),
      b"PN" => Ok(Self::PersonName),
      b"SH" => Ok(Self::ShortString),
      b"SL" => Ok(Self::SignedLong),
      b"SQ" => Ok(Self::Sequence),
      b"SS" => Ok(Self::SignedShort),
      b"ST" => Ok(Self::ShortText),
      b"SV" => Ok(Self::SignedVeryLong),
      b"TM" => Ok(Self::Time),
      b"UC" => Ok(Self::UnlimitedCharacters),
      b"UI" => Ok(Self::UniqueIdentifier),
      b"UL" => Ok(Self::UnsignedLong),
      b"UN" => Ok(Self::Unknown),
      b"UR" => Ok(Self::UniversalResourceIdentifier),
      b"US" => Ok(Self::UnsignedShort),
      b"UT" => Ok(Self::UnlimitedText),
      b"UV" => Ok(Self::UnsignedVeryLong),
      _ => Err(()),
    }
  }

  /// Returns the two ASCII bytes for a VR as written to a P10 data element
  /// header.
  ///
  pub fn to_bytes(self) -> [u8; 2] {
    match self {
      Self::AgeString => *b"AS",
      Self::ApplicationEntity => *b"AE",
      Self::AttributeTag => *b"AT",
      Self::CodeString => *b"CS",
      Self::Date => *b"DA",
      Self::DateTime => *b"DT",
      Self::DecimalString => *b"DS",
      Self::FloatingPointDouble => *b"FD",
      Self::FloatingPointSingle => *b"FL",
      Self::IntegerString => *b"IS",
      Self::LongString => *b"LO",
      Self::LongText => *b"LT",
      Self::OtherByteString => *b"OB",
      Self::OtherDoubleString => *b"OD",
      Self::OtherFloatString => *b"OF",
      Self::OtherLongString => *b"OL",
      Self::OtherVeryLongString => *b"OV",
      Self::OtherWordString => *b"OW",
      Self::PersonName => *b"PN",
      Self::Sequence => *b"SQ",
      Self::ShortString => *b"SH",
      Self::ShortText => *b"ST",
      Self::SignedLong => *b"SL",
      Self::SignedShort => *b"SS",
      Self::SignedVeryLong => *b"SV",
      Self::Time => *b"TM",
      Self::UniqueIdentifier => *b"UI",
      Self::UniversalResourceIdentifier => *b"UR",
      Self::Unknown => *b"UN",
      Self::UnlimitedCharacters => *b"UC",
      Self::UnlimitedText => *b"UT",
      Self::UnsignedLong => *b"UL",
      Self::UnsignedShort => *b"US",
      Self::UnsignedVeryLong => *b"UV",
    }
  }

  /// Returns the size of the value length for a VR stored in the DICOM P10
  /// format.
  ///
  pub fn value_length_size(self) -> ValueLengthSize {
    match self {
      Self::OtherByteString
      | Self::OtherDoubleString
      | Self::OtherFloatString
      | Self::OtherLongString
      | Self::OtherVeryLongString
      | Self::OtherWordString
      | Self::Sequence
      | Self::SignedVeryLong
      | Self::UniversalResourceIdentifier
      | Self::Unknown
      | Self::UnlimitedCharacters
      | Self::UnlimitedText
      | Self::UnsignedVeryLong => ValueLengthSize::U32,

      _ => ValueLengthSize::U16,
    }
  }

  /// Returns whether values of this VR are text decoded with trailing nulls
  /// and spaces trimmed.
  ///
  pub fn is_string(self) -> bool {
    matches!(
      self,
      Self::AgeString
        | Self::ApplicationEntity
        | Self::CodeString
        | Self::Date
        | Self::DateTime
        | Self::DecimalString
        | Self::IntegerString
        | Self::LongString
        | Self::LongText
        | Self::PersonName
        | Self::ShortString
        | Self::ShortText
        | Self::Time
        | Self::UniqueIdentifier
        | Self::UniversalResourceIdentifier
        | Self::UnlimitedCharacters
        | Self::UnlimitedText
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_bytes_test() {
    assert_eq!(
      ValueRepresentation::from_bytes(b"OB"),
      Ok(ValueRepresentation::OtherByteString)
    );

    assert_eq!(ValueRepresentation::from_bytes(b"XX"), Err(()));
  }

  #[test]
  fn to_string_test() {
    assert_eq!(ValueRepresentation::UniqueIdentifier.to_string(), "UI");
    assert_eq!(ValueRepresentation::UnsignedShort.to_string(), "US");
  }

  #[test]
  fn value_length_size_test() {
    for vr in [b"OB", b"OD", b"OF", b"OL", b"OW", b"SQ", b"UC", b"UN", b"UR",
      b"UT"]
    {
      assert!(matches!(
        ValueRepresentation::from_bytes(vr).unwrap().value_length_size(),
        ValueLengthSize::U32
      ));
    }

    assert!(matches!(
      ValueRepresentation::UnsignedShort.value_length_size(),
      ValueLengthSize::U16
    ));
  }
}
