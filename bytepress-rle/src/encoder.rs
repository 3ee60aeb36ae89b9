//! RLE encoding.

use bytepress_core::error::Result;
use bytepress_core::report::ProgressCallback;
use bytepress_core::stream::{read_chunk, remaining_len};
use bytepress_core::{CHUNK_SIZE, Level};
use std::io::{Read, Seek, Write};

/// Run-length encode `input` into `output`.
///
/// The input is consumed in 4 KiB chunks; within a chunk a run extends
/// greedily while the next byte matches and the run is below the level's
/// cap. Runs never cross a chunk boundary. Each run is emitted as a
/// `(count, value)` octet pair, so the output is exactly `2 * runs` bytes.
///
/// Returns the number of compressed bytes written.
pub fn compress<R, W>(
    input: &mut R,
    output: &mut W,
    level: Level,
    mut progress: Option<ProgressCallback<'_>>,
) -> Result<u64>
where
    R: Read + Seek,
    W: Write,
{
    let total = remaining_len(input)?;
    let max_run = level.max_run() as usize;

    let mut chunk = [0u8; CHUNK_SIZE];
    let mut processed = 0u64;
    let mut written = 0u64;

    loop {
        let len = read_chunk(input, &mut chunk)?;
        if len == 0 {
            break;
        }

        let mut i = 0;
        while i < len {
            let value = chunk[i];
            let mut count = 1;
            while i + count < len && chunk[i + count] == value && count < max_run {
                count += 1;
            }
            output.write_all(&[count as u8, value])?;
            written += 2;
            i += count;
        }

        processed += len as u64;
        if let Some(cb) = progress.as_mut() {
            cb(processed, total);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(data: &[u8], level: Level) -> Vec<u8> {
        let mut out = Vec::new();
        compress(&mut Cursor::new(data), &mut out, level, None).unwrap();
        out
    }

    #[test]
    fn test_single_run() {
        // 5 x 0xAA at balanced -> one (5, 0xAA) pair
        assert_eq!(encode(&[0xAA; 5], Level::Balanced), vec![0x05, 0xAA]);
    }

    #[test]
    fn test_run_cap_fast() {
        // 300 x 0x42 at fast: 64 + 64 + 64 + 64 + 44
        assert_eq!(
            encode(&[0x42; 300], Level::Fast),
            vec![0x40, 0x42, 0x40, 0x42, 0x40, 0x42, 0x40, 0x42, 0x2C, 0x42]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode(&[], Level::Max), Vec::<u8>::new());
    }

    #[test]
    fn test_runs_do_not_cross_chunk_boundary() {
        // 5000 identical bytes at max: chunk 1 holds 4096 (16 x 255 + 16),
        // chunk 2 holds 904 (3 x 255 + 139).
        let out = encode(&vec![0x11u8; 5000], Level::Max);
        let runs: Vec<u8> = out.chunks(2).map(|p| p[0]).collect();
        let mut expected = vec![255u8; 16];
        expected.push(16);
        expected.extend_from_slice(&[255, 255, 255, 139]);
        assert_eq!(runs, expected);
        assert!(out.chunks(2).all(|p| p[1] == 0x11));
    }

    #[test]
    fn test_worst_case_expansion_is_twice() {
        let data: Vec<u8> = (0u16..1024).map(|i| (i % 256) as u8).collect();
        let out = encode(&data, Level::Balanced);
        assert_eq!(out.len(), data.len() * 2);
    }

    #[test]
    fn test_progress_reports_chunk_totals() {
        let data = vec![0u8; CHUNK_SIZE + 100];
        let mut samples = Vec::new();
        let mut cb = |done: u64, total: u64| samples.push((done, total));
        let mut out = Vec::new();
        compress(
            &mut Cursor::new(&data),
            &mut out,
            Level::Max,
            Some(&mut cb),
        )
        .unwrap();
        assert_eq!(
            samples,
            vec![
                (CHUNK_SIZE as u64, data.len() as u64),
                (data.len() as u64, data.len() as u64)
            ]
        );
    }
}
