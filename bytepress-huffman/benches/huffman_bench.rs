//! Huffman codec throughput benchmarks across data patterns and sizes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Cursor;

/// Generate test data patterns for benchmarking
mod test_data {
    /// Uniform data - all bytes are the same
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    /// Random data - varied byte values
    pub fn random(size: usize) -> Vec<u8> {
        // Simple PRNG for reproducible random data
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            // Linear congruential generator
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    /// Text-like data
    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

fn bench_compress_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_compress_sizes");

    let sizes = [
        ("4KB", 4 * 1024),
        ("64KB", 64 * 1024),
        ("1MB", 1024 * 1024),
    ];

    for (size_name, size) in sizes {
        let data = test_data::text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::new();
                bytepress_huffman::compress(&mut Cursor::new(black_box(data)), &mut out, None)
                    .unwrap();
                black_box(out);
            });
        });
    }

    group.finish();
}

fn bench_compress_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_compress_patterns");

    let size = 64 * 1024;
    let patterns = [
        ("uniform", test_data::uniform(size)),
        ("random", test_data::random(size)),
        ("text", test_data::text_like(size)),
    ];

    for (pattern_name, data) in &patterns {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(*pattern_name),
            data,
            |b, data| {
                b.iter(|| {
                    let mut out = Vec::new();
                    bytepress_huffman::compress(&mut Cursor::new(black_box(data)), &mut out, None)
                        .unwrap();
                    black_box(out);
                });
            },
        );
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_decompress");

    let size = 256 * 1024;
    let data = test_data::text_like(size);
    let mut compressed = Vec::new();
    bytepress_huffman::compress(&mut Cursor::new(&data), &mut compressed, None).unwrap();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(
        BenchmarkId::from_parameter("256KB_text"),
        &compressed,
        |b, compressed| {
            b.iter(|| {
                let mut out = Vec::new();
                bytepress_huffman::decompress(&mut Cursor::new(black_box(compressed)), &mut out)
                    .unwrap();
                black_box(out);
            });
        },
    );

    group.finish();
}

criterion_group!(
    benches,
    bench_compress_sizes,
    bench_compress_patterns,
    bench_decompress,
);
criterion_main!(benches);
