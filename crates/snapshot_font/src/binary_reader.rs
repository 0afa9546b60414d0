//! Big-endian readers for font table data.

use std::io::{self, Read};

/// Read an unsigned 16-bit big-endian value from the cursor.
pub fn read_u16_be<R: Read>(reader: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

/// Read an unsigned 32-bit big-endian value.
pub fn read_u32_be<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn slice_at(slice: &[u8], offset: usize, len: usize) -> io::Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| slice.get(offset..end))
        .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "read past end of table"))
}

/// Read a u16 at a specific offset in a slice.
pub fn u16_at(slice: &[u8], offset: usize) -> io::Result<u16> {
    let b = slice_at(slice, offset, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub fn i16_at(slice: &[u8], offset: usize) -> io::Result<i16> {
    let b = slice_at(slice, offset, 2)?;
    Ok(i16::from_be_bytes([b[0], b[1]]))
}

pub fn u32_at(slice: &[u8], offset: usize) -> io::Result<u32> {
    let b = slice_at(slice, offset, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
