//! Benchmark command implementation.

use crate::utils::format_size;
use bytepress_archive::benchmark;
use bytepress_core::{Algorithm, Level};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

/// Machine-readable benchmark summary for `--json`.
#[derive(Serialize)]
struct BenchmarkJson<'a> {
    input: &'a str,
    algorithm: &'a str,
    level: &'a str,
    original_size: u64,
    compressed_size: u64,
    ratio: f64,
    compression_seconds: f64,
    decompression_seconds: f64,
}

pub fn cmd_benchmark(
    input: &Path,
    algorithm: Algorithm,
    level: Level,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let result = benchmark::run(input, algorithm, level)?;
    let report = &result.report;

    if json {
        let input_path = input.display().to_string();
        let payload = BenchmarkJson {
            input: &input_path,
            algorithm: report.algorithm.name(),
            level: report.level.name(),
            original_size: report.original_size,
            compressed_size: report.compressed_size,
            ratio: report.ratio,
            compression_seconds: result.compression_time.as_secs_f64(),
            decompression_seconds: result.decompression_time.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Benchmark: {}", input.display());
    if algorithm == Algorithm::Hybrid {
        println!("  Algorithm: {} (hybrid pick)", report.algorithm);
    } else {
        println!("  Algorithm: {}", report.algorithm);
    }
    println!("  Level: {}", report.level);
    println!("  Original: {}", format_size(report.original_size));
    println!(
        "  Compressed: {} ({:.1}% of original)",
        format_size(report.compressed_size),
        report.ratio * 100.0
    );
    println!(
        "  Compression: {:.4} s",
        result.compression_time.as_secs_f64()
    );
    println!(
        "  Decompression: {:.4} s",
        result.decompression_time.as_secs_f64()
    );
    Ok(())
}
