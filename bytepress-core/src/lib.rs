//! # BytePress Core
//!
//! Core components for the BytePress compression engine:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for the entropy coder
//! - [`method`]: algorithm and level identifiers with their wire tags
//! - [`report`]: compression reports and the progress callback type
//! - [`stream`]: chunked byte-stream helpers
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! BytePress is a layered stack:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ CLI                                                  │
//! │     argument parsing, progress bars, report file     │
//! ├──────────────────────────────────────────────────────┤
//! │ Archive                                              │
//! │     container, hybrid selector, envelope, dispatch   │
//! ├──────────────────────────────────────────────────────┤
//! │ Codecs                                               │
//! │     bounded RLE, two-pass static Huffman             │
//! ├──────────────────────────────────────────────────────┤
//! │ Core (this crate)                                    │
//! │     BitReader/BitWriter, types, errors               │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is single-threaded and synchronous; all I/O is blocking and
//! every bit-buffer register is per-instance state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod method;
pub mod report;
pub mod stream;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{BytePressError, Result};
pub use method::{Algorithm, Level};
pub use report::{CompressionReport, ProgressCallback};

/// Chunk size shared by the codecs and the container copy loops.
pub const CHUNK_SIZE: usize = 4096;
