//! # BytePress Huffman
//!
//! Two-pass static Huffman coding over seekable byte streams.
//!
//! The encoder reads the input once to build a 256-entry frequency table,
//! writes the table (with the original size) as a fixed 1032-byte header,
//! rewinds, and writes each byte's canonical code MSB-first. The decoder
//! rebuilds the identical tree from the embedded table, so no explicit
//! code table ships on the wire. Tie-breaking during tree construction is
//! deterministic: equal weights resolve to the earlier byte value, and
//! merged roots fuse in FIFO creation order.
//!
//! Edge cases: empty input produces the header alone; an input with a
//! single distinct byte value is coded at one bit per byte.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! let data = b"AAAABBBCCD";
//! let mut compressed = Vec::new();
//! bytepress_huffman::compress(&mut Cursor::new(&data[..]), &mut compressed, None).unwrap();
//!
//! let mut restored = Vec::new();
//! bytepress_huffman::decompress(&mut Cursor::new(&compressed), &mut restored).unwrap();
//! assert_eq!(restored, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decode;
mod encode;
mod tree;

pub use decode::decompress;
pub use encode::{HEADER_LEN, compress};
