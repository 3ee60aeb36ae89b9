//! Huffman decoding.

use crate::tree::{ALPHABET, Node, build_tree};
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::{BitReader, CHUNK_SIZE};
use std::io::{Read, Write};

/// Read an exact header field, mapping a short read to `Truncated`.
fn read_header_field<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    input.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BytePressError::truncated(buf.len() as u64)
        } else {
            e.into()
        }
    })
}

/// Decode a Huffman stream produced by [`compress`](crate::compress).
///
/// The frequency table embedded in the header rebuilds the encoder's tree
/// (construction is deterministic, so both sides agree on every code).
/// Bits are walked from the root, left on 0 and right on 1, until exactly
/// `original_size` bytes have been emitted; trailing padding bits are
/// ignored.
///
/// Returns the number of decompressed bytes written.
pub fn decompress<R, W>(input: &mut R, output: &mut W) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let mut size_buf = [0u8; 8];
    read_header_field(input, &mut size_buf)?;
    let original_size = u64::from_le_bytes(size_buf);

    let mut freq = [0u64; ALPHABET];
    let mut entry = [0u8; 4];
    for slot in freq.iter_mut() {
        read_header_field(input, &mut entry)?;
        *slot = u32::from_le_bytes(entry) as u64;
    }

    if original_size == 0 {
        return Ok(0);
    }

    let root = build_tree(&freq).ok_or_else(|| {
        BytePressError::malformed("empty frequency table with non-zero original size")
    })?;

    let mut reader = BitReader::new(&mut *input);
    let mut buffer = Vec::with_capacity(CHUNK_SIZE);
    let mut decoded = 0u64;
    let mut cursor = &root;

    while decoded < original_size {
        let bit = reader
            .read_bit()?
            .ok_or_else(|| BytePressError::truncated(original_size - decoded))?;

        cursor = match cursor {
            Node::Internal(left, right) => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
            Node::Leaf(_) => unreachable!("cursor resets to the root after each symbol"),
        };

        if let Node::Leaf(value) = cursor {
            buffer.push(*value);
            if buffer.len() == CHUNK_SIZE {
                output.write_all(&buffer)?;
                buffer.clear();
            }
            decoded += 1;
            cursor = &root;
        }
    }

    output.write_all(&buffer)?;
    Ok(decoded)
}
