//! Hybrid codec selection.
//!
//! The selector trial-encodes the input with both codecs into temporary
//! files and keeps the smaller output. It does not invent a wire format:
//! the chosen payload is byte-identical to what that codec produces alone,
//! and the winning tag is returned explicitly so the caller can record it
//! (in a container entry header or a report).

use bytepress_core::error::Result;
use bytepress_core::{Algorithm, Level};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

/// Trial-compress `input` with RLE and Huffman, keeping the smaller.
///
/// Ties go to Huffman. A codec that fails is disqualified; if both fail
/// the first error propagates. The returned file is an anonymous
/// tempfile holding the winning payload, rewound to the start; the
/// losing trial (and the winner, once dropped) is deleted by the OS.
pub fn select<R>(input: &mut R, level: Level) -> Result<(Algorithm, File)>
where
    R: Read + Seek,
{
    let start = input.stream_position()?;

    let mut rle_sink = tempfile::tempfile()?;
    let rle_size = bytepress_rle::compress(input, &mut rle_sink, level, None);

    input.seek(SeekFrom::Start(start))?;
    let mut huffman_sink = tempfile::tempfile()?;
    let huffman_size = bytepress_huffman::compress(input, &mut huffman_sink, None);

    let (algorithm, mut chosen) = match (rle_size, huffman_size) {
        (Ok(rle), Ok(huffman)) if rle < huffman => (Algorithm::Rle, rle_sink),
        (_, Ok(_)) => (Algorithm::Huffman, huffman_sink),
        (Ok(_), Err(_)) => (Algorithm::Rle, rle_sink),
        (Err(e), Err(_)) => return Err(e),
    };

    chosen.seek(SeekFrom::Start(0))?;
    Ok((algorithm, chosen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(data: &[u8], level: Level) -> (Algorithm, Vec<u8>) {
        let (algorithm, mut file) = select(&mut Cursor::new(data), level).unwrap();
        let mut payload = Vec::new();
        file.read_to_end(&mut payload).unwrap();
        (algorithm, payload)
    }

    fn rle_size(data: &[u8], level: Level) -> u64 {
        let mut out = Vec::new();
        bytepress_rle::compress(&mut Cursor::new(data), &mut out, level, None).unwrap()
    }

    fn huffman_size(data: &[u8]) -> u64 {
        let mut out = Vec::new();
        bytepress_huffman::compress(&mut Cursor::new(data), &mut out, None).unwrap()
    }

    #[test]
    fn test_alternating_input_picks_huffman() {
        // Runs of length 1 make RLE expand 2x; Huffman codes the two
        // symbols at a bit each.
        let data: Vec<u8> = (0..1024).map(|i| if i % 2 == 0 { b'A' } else { b'B' }).collect();
        let (algorithm, payload) = run(&data, Level::Balanced);
        assert_eq!(algorithm, Algorithm::Huffman);
        assert_eq!(payload.len() as u64, huffman_size(&data));
    }

    #[test]
    fn test_uniform_input_picks_rle() {
        let data = vec![b'X'; 1024];
        let (algorithm, payload) = run(&data, Level::Max);
        assert_eq!(algorithm, Algorithm::Rle);
        assert_eq!(payload.len() as u64, rle_size(&data, Level::Max));
    }

    #[test]
    fn test_output_is_the_minimum_of_both() {
        let inputs: Vec<Vec<u8>> = vec![
            vec![0u8; 4096],
            (0u16..2048).map(|i| (i % 256) as u8).collect(),
            b"mixed content with some runs....    and some text".repeat(20),
        ];
        for data in &inputs {
            for level in [Level::Fast, Level::Balanced, Level::Max] {
                let (_, payload) = run(data, level);
                let best = rle_size(data, level).min(huffman_size(data));
                assert_eq!(payload.len() as u64, best);
            }
        }
    }

    #[test]
    fn test_chosen_payload_decodes() {
        let data = b"round trip through the winning codec".repeat(8);
        let (algorithm, mut file) = select(&mut Cursor::new(&data), Level::Fast).unwrap();
        let mut restored = Vec::new();
        match algorithm {
            Algorithm::Rle => {
                bytepress_rle::decompress(&mut file, &mut restored).unwrap();
            }
            Algorithm::Huffman => {
                bytepress_huffman::decompress(&mut file, &mut restored).unwrap();
            }
            Algorithm::Hybrid => unreachable!(),
        }
        assert_eq!(restored, data);
    }
}
