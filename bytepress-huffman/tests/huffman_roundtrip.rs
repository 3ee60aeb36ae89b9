//! End-to-end Huffman property tests on larger inputs.

use bytepress_huffman::{HEADER_LEN, compress, decompress};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    compress(&mut Cursor::new(data), &mut compressed, None).unwrap();
    let mut restored = Vec::new();
    decompress(&mut Cursor::new(&compressed), &mut restored).unwrap();
    restored
}

#[test]
fn random_megabyte_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x42);
    let data: Vec<u8> = (0..1 << 20).map(|_| rng.r#gen()).collect();
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn skewed_distribution_roundtrip_and_shrink() {
    // 90% one symbol: the stream must come out well under the input size
    // even after the fixed header.
    let mut rng = StdRng::seed_from_u64(7);
    let data: Vec<u8> = (0..1 << 18)
        .map(|_| if rng.gen_ratio(9, 10) { b'a' } else { rng.r#gen() })
        .collect();

    let mut compressed = Vec::new();
    compress(&mut Cursor::new(&data), &mut compressed, None).unwrap();
    assert!(compressed.len() < data.len());

    let mut restored = Vec::new();
    decompress(&mut Cursor::new(&compressed), &mut restored).unwrap();
    assert_eq!(restored, data);
}

#[test]
fn single_symbol_megabyte_payload_length() {
    let data = vec![0xEEu8; 1 << 20];
    let mut compressed = Vec::new();
    compress(&mut Cursor::new(&data), &mut compressed, None).unwrap();
    assert_eq!(compressed.len() as u64, HEADER_LEN + (1u64 << 20) / 8);
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn text_like_input_roundtrip() {
    let data = b"It was the best of times, it was the worst of times. ".repeat(500);
    assert_eq!(roundtrip(&data), data);
}
