//! # BytePress Archive
//!
//! The composition layer of BytePress: everything between the raw codecs
//! and the command line.
//!
//! - [`dispatch`]: routes `(algorithm, level, password)` to a codec
//!   pipeline and samples a [`CompressionReport`]
//! - [`hybrid`]: trial-runs both codecs and keeps the smaller output
//! - [`container`]: the multi-member archive format with per-entry
//!   metadata headers
//! - [`crypto`]: the AES-256-CBC/PBKDF2 envelope around a compressed
//!   stream
//! - [`benchmark`]: timed compress/decompress cycles
//!
//! Data flow on compression: raw bytes, then a codec (or the hybrid
//! selector), then optional container framing, then the optional
//! envelope. Decompression reverses the chain; the codec identity comes
//! from the caller or the container entry tag.
//!
//! [`CompressionReport`]: bytepress_core::CompressionReport

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod benchmark;
pub mod container;
pub mod crypto;
pub mod dispatch;
pub mod hybrid;

pub use benchmark::BenchmarkResult;
pub use container::{ArchiveReader, ArchiveWriter, EntryHeader, PATH_CAP};
