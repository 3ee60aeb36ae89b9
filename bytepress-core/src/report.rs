//! Compression reporting and progress callbacks.

use crate::method::{Algorithm, Level};
use std::time::Duration;

/// Chunk-granularity progress callback: `(bytes_processed, total_bytes)`.
///
/// Invoked on the codec thread; implementations must not assume it is
/// thread-safe or fast, and codecs must not call it more often than once
/// per chunk.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(u64, u64);

/// Summary of one compression operation, populated by the dispatcher.
#[derive(Debug, Clone)]
pub struct CompressionReport {
    /// Codec that produced the output (hybrid resolves to RLE or Huffman).
    pub algorithm: Algorithm,
    /// Level the operation was invoked with.
    pub level: Level,
    /// Input size in bytes.
    pub original_size: u64,
    /// Bytes written to the sink.
    pub compressed_size: u64,
    /// `compressed_size / original_size`, 0.0 for empty input.
    pub ratio: f64,
    /// Wall-clock duration of the operation.
    pub wall_time: Duration,
}

impl CompressionReport {
    /// Build a report from measured sizes and elapsed wall time.
    pub fn new(
        algorithm: Algorithm,
        level: Level,
        original_size: u64,
        compressed_size: u64,
        wall_time: Duration,
    ) -> Self {
        let ratio = if original_size > 0 {
            compressed_size as f64 / original_size as f64
        } else {
            0.0
        };
        Self {
            algorithm,
            level,
            original_size,
            compressed_size,
            ratio,
            wall_time,
        }
    }

    /// Space savings as a percentage of the original size.
    pub fn space_savings(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            (1.0 - self.ratio) * 100.0
        }
    }
}
