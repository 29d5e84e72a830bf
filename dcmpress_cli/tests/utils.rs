/// Builds a native explicit VR little endian DICOM file around the given
/// pixel data.
///
#[allow(dead_code)]
pub fn build_native_dicom(
  width: u16,
  height: u16,
  bits: u16,
  modality: &str,
  pixel_data: &[u8],
) -> Vec<u8> {
  let mut bytes = vec![0u8; 128];
  bytes.extend_from_slice(b"DICM");

  write_element(&mut bytes, 0x0002, 0x0010, b"UI", b"1.2.840.10008.1.2.1\0");
  write_element(
    &mut bytes,
    0x0008,
    0x0016,
    b"UI",
    b"1.2.840.10008.5.1.4.1.1.2\0",
  );
  write_element(&mut bytes, 0x0008, 0x0018, b"UI", b"1.2.3.4.5.6.7.8\0");
  write_element(&mut bytes, 0x0008, 0x0060, b"CS", modality.as_bytes());

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
