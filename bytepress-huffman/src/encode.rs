//! Two-pass Huffman encoding.

use crate::tree::{ALPHABET, CodeTable, build_tree};
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::report::ProgressCallback;
use bytepress_core::stream::read_chunk;
use bytepress_core::{BitWriter, CHUNK_SIZE};
use std::io::{Read, Seek, SeekFrom, Write};

/// Size of the stream header: `original_size: u64` plus 256 `u32`
/// frequency entries, all little-endian.
pub const HEADER_LEN: u64 = 8 + 4 * ALPHABET as u64;

/// Huffman-encode `input` into `output`.
///
/// Two passes over a rewindable source: the first accumulates the
/// frequency table, then the header (`original_size` and the table) is
/// emitted, then the source is rewound and every byte's code is written
/// MSB-first. The final flush pads the payload to an octet boundary with
/// at most 7 zero bits.
///
/// Empty input emits the header only. The compression level is
/// intentionally not a parameter; the codec is level-oblivious.
///
/// Returns the number of compressed bytes written, header included.
pub fn compress<R, W>(
    input: &mut R,
    output: &mut W,
    mut progress: Option<ProgressCallback<'_>>,
) -> Result<u64>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;

    // Pass 1: frequencies.
    let mut freq = [0u64; ALPHABET];
    let mut total = 0u64;
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let len = read_chunk(input, &mut chunk)?;
        if len == 0 {
            break;
        }
        for &byte in &chunk[..len] {
            freq[byte as usize] += 1;
        }
        total += len as u64;
    }

    // The wire format stores each count in 4 bytes.
    if freq.iter().any(|&f| f > u32::MAX as u64) {
        return Err(BytePressError::malformed(
            "frequency count exceeds the 32-bit table field",
        ));
    }

    output.write_all(&total.to_le_bytes())?;
    for &f in &freq {
        output.write_all(&(f as u32).to_le_bytes())?;
    }

    if total == 0 {
        return Ok(HEADER_LEN);
    }

    let root = build_tree(&freq)
        .ok_or_else(|| BytePressError::malformed("no symbols in non-empty input"))?;
    let codes = CodeTable::from_tree(&root);

    // Pass 2: emit codes.
    input.seek(SeekFrom::Start(start))?;
    let mut writer = BitWriter::new(&mut *output);
    let mut processed = 0u64;
    loop {
        let len = read_chunk(input, &mut chunk)?;
        if len == 0 {
            break;
        }
        for &byte in &chunk[..len] {
            let (code, code_len) = codes.get(byte);
            writer.write_code(code, code_len)?;
        }
        processed += len as u64;
        if let Some(cb) = progress.as_mut() {
            cb(processed, total);
        }
    }
    let payload = writer.bits_written().div_ceil(8);
    writer.flush()?;

    Ok(HEADER_LEN + payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        compress(&mut Cursor::new(data), &mut out, None).unwrap();
        out
    }

    #[test]
    fn test_empty_input_is_header_only() {
        let out = encode(&[]);
        assert_eq!(out.len() as u64, HEADER_LEN);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_header_layout() {
        let out = encode(b"AAAABBBCCD");
        assert_eq!(u64::from_le_bytes(out[..8].try_into().unwrap()), 10);
        let freq_at = |byte: usize| {
            let off = 8 + 4 * byte;
            u32::from_le_bytes(out[off..off + 4].try_into().unwrap())
        };
        assert_eq!(freq_at(b'A' as usize), 4);
        assert_eq!(freq_at(b'B' as usize), 3);
        assert_eq!(freq_at(b'C' as usize), 2);
        assert_eq!(freq_at(b'D' as usize), 1);
        assert_eq!(freq_at(b'E' as usize), 0);
        // 19 code bits pack into 3 payload octets.
        assert_eq!(out.len() as u64, HEADER_LEN + 3);
    }

    #[test]
    fn test_single_symbol_payload_is_one_bit_per_byte() {
        for n in [1usize, 5, 8, 9, 1 << 20] {
            let out = encode(&vec![b'X'; n]);
            assert_eq!(out.len() as u64, HEADER_LEN + (n as u64).div_ceil(8));
        }
    }

    #[test]
    fn test_compressed_size_matches_return_value() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let mut out = Vec::new();
        let written = compress(&mut Cursor::new(&data[..]), &mut out, None).unwrap();
        assert_eq!(written, out.len() as u64);
    }

    #[test]
    fn test_encode_resumes_from_current_position() {
        // Bytes before the cursor position must not be encoded.
        let mut cursor = Cursor::new(b"zzzAAAA".to_vec());
        cursor.set_position(3);
        let mut out = Vec::new();
        let written = compress(&mut cursor, &mut out, None).unwrap();
        assert_eq!(u64::from_le_bytes(out[..8].try_into().unwrap()), 4);
        assert_eq!(written, HEADER_LEN + 1);
    }
}
