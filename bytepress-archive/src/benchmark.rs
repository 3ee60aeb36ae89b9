//! Compression benchmarking.

use crate::dispatch;
use bytepress_core::error::{BytePressError, Result};
use bytepress_core::report::CompressionReport;
use bytepress_core::{Algorithm, Level};
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::time::{Duration, Instant};

/// Timings and sizes for one compress-then-decompress cycle.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Report of the compression half, including the resolved algorithm.
    pub report: CompressionReport,
    /// Wall-clock time of the compression half.
    pub compression_time: Duration,
    /// Wall-clock time of the decompression half.
    pub decompression_time: Duration,
}

/// Compress `input` into a tempfile, decompress it back, and time both
/// halves. The round-trip size is verified before the result is returned.
pub fn run(input: &Path, algorithm: Algorithm, level: Level) -> Result<BenchmarkResult> {
    let mut source = File::open(input)?;

    let mut compressed = tempfile::tempfile()?;
    let report = dispatch::compress(&mut source, &mut compressed, algorithm, level, None, None)?;
    let compression_time = report.wall_time;

    compressed.seek(SeekFrom::Start(0))?;
    let mut restored = tempfile::tempfile()?;
    let started = Instant::now();
    let written = dispatch::decompress(&mut compressed, &mut restored, report.algorithm, None)?;
    let decompression_time = started.elapsed();

    if written != report.original_size {
        return Err(BytePressError::malformed(format!(
            "benchmark round-trip produced {} bytes, expected {}",
            written, report.original_size
        )));
    }

    Ok(BenchmarkResult {
        report,
        compression_time,
        decompression_time,
    })
}
