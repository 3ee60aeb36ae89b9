//! RLE decoding.

use bytepress_core::error::{BytePressError, Result};
use std::io::{Read, Write};

/// Read one byte, distinguishing clean EOF (`None`) from I/O failure.
fn read_byte<R: Read>(input: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Decode an RLE stream of `(count, value)` pairs until end of input.
///
/// A zero `count` is structurally invalid and rejected as [`Malformed`];
/// end of input after a `count` but before its `value` is [`Truncated`].
///
/// Returns the number of decompressed bytes written.
///
/// [`Malformed`]: BytePressError::Malformed
/// [`Truncated`]: BytePressError::Truncated
pub fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let mut written = 0u64;

    while let Some(count) = read_byte(input)? {
        if count == 0 {
            return Err(BytePressError::malformed("RLE run with zero count"));
        }
        let value = match read_byte(input)? {
            Some(v) => v,
            None => return Err(BytePressError::truncated(1)),
        };

        let run = [value; 255];
        output.write_all(&run[..count as usize])?;
        written += count as u64;
    }

    Ok(written)
}
