//! Byte-stream helpers shared by the codecs and the container.

use crate::error::Result;
use std::io::{Read, Seek, SeekFrom};

/// Fill `buf` from `input`, returning the number of bytes obtained.
///
/// Short only at end of stream, so chunk boundaries are deterministic for
/// a given input regardless of how the underlying reader fragments reads.
pub fn read_chunk<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Length of the stream remaining after the cursor, leaving the cursor
/// where it was.
pub fn remaining_len<R: Read + Seek>(input: &mut R) -> Result<u64> {
    let pos = input.stream_position()?;
    let end = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(pos))?;
    Ok(end - pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_chunk_fills_fully() {
        let data = vec![7u8; 100];
        let mut cursor = Cursor::new(&data);
        let mut buf = [0u8; 64];
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 64);
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 36);
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_remaining_len_preserves_position() {
        let mut cursor = Cursor::new(vec![0u8; 50]);
        cursor.set_position(10);
        assert_eq!(remaining_len(&mut cursor).unwrap(), 40);
        assert_eq!(cursor.position(), 10);
    }
}
