use byteorder::{ByteOrder, LittleEndian};

/// A cursor over an in-memory byte buffer with little-endian reads, used when
/// parsing DICOM P10 data. All reads are bounds-checked and return
/// [`ByteReaderError::DataEnd`] rather than panicking when the buffer is
/// exhausted.
///
pub struct ByteReader<'a> {
  bytes: &'a [u8],
  offset: usize,
}

/// Data was not read because it would go past the end of the buffer.
///
#[derive(Debug, PartialEq)]
pub struct DataEnd;

impl<'a> ByteReader<'a> {
  /// Creates a new byte reader starting at the given offset.
  ///
  pub fn new(bytes: &'a [u8], offset: usize) -> Self {
    Self { bytes, offset }
  }

  /// Returns the current read offset from the start of the buffer.
  ///
  pub fn offset(&self) -> usize {
    self.offset
  }

  /// Returns the number of unread bytes.
  ///
  pub fn remaining(&self) -> usize {
    self.bytes.len().saturating_sub(self.offset)
  }

  /// Returns whether all bytes have been read.
  ///
  pub fn is_at_end(&self) -> bool {
    self.remaining() == 0
  }

  /// Reads the given number of bytes, advancing the offset.
  ///
  pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], DataEnd> {
    if count > self.remaining() {
      return Err(DataEnd);
    }

    let bytes = &self.bytes[self.offset..self.offset + count];
    self.offset += count;

    Ok(bytes)
  }

  /// Reads a little-endian `u16`, advancing the offset.
  ///
  pub fn read_u16(&mut self) -> Result<u16, DataEnd> {
    Ok(LittleEndian::read_u16(self.read_bytes(2)?))
  }

  /// Reads a little-endian `u32`, advancing the offset.
  ///
  pub fn read_u32(&mut self) -> Result<u32, DataEnd> {
    Ok(LittleEndian::read_u32(self.read_bytes(4)?))
  }

  /// Advances the offset by the given number of bytes.
  ///
  pub fn skip(&mut self, count: usize) -> Result<(), DataEnd> {
    self.read_bytes(count).map(|_| ())
  }

  /// Returns the bytes between two absolute offsets that have already been
  /// visited.
  ///
  pub fn bytes_between(&self, start: usize, end: usize) -> &'a [u8] {
    &self.bytes[start..end]
  }

  /// Moves the read offset to an absolute position in the buffer.
  ///
  pub fn seek(&mut self, offset: usize) {
    self.offset = offset.min(self.bytes.len());
  }

  /// Searches forward from the current offset for the first occurrence of the
  /// given byte pattern, returning its absolute offset.
  ///
  pub fn find(&self, pattern: &[u8]) -> Option<usize> {
    self.bytes[self.offset..]
      .windows(pattern.len())
      .position(|window| window == pattern)
      .map(|position| self.offset + position)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn read_past_end_test() {
    let mut reader = ByteReader::new(&[1, 2, 3], 0);

    assert_eq!(reader.read_u16(), Ok(0x0201));
    assert_eq!(reader.read_u16(), Err(DataEnd));
    assert_eq!(reader.remaining(), 1);
  }

  #[test]
  fn find_test() {
    let reader = ByteReader::new(&[0, 1, 2, 3, 4, 5], 2);

    assert_eq!(reader.find(&[3, 4]), Some(3));
    assert_eq!(reader.find(&[0, 1]), None);
  }
}
