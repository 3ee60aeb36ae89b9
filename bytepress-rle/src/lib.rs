//! # BytePress RLE
//!
//! Bounded run-length coding: the input is consumed in 4 KiB chunks and
//! each maximal run of identical octets (capped by the compression level)
//! is emitted as a `(count, value)` pair.
//!
//! The run cap is 64 at [`Level::Fast`], 128 at [`Level::Balanced`], and
//! 255 at [`Level::Max`]. Runs never cross a chunk boundary, so the worst
//! case is one extra pair at every 4 KiB boundary; non-repetitive input
//! expands by at most 2x.
//!
//! ## Example
//!
//! ```rust
//! use bytepress_core::Level;
//! use std::io::Cursor;
//!
//! let data = vec![0x42u8; 300];
//! let mut compressed = Vec::new();
//! bytepress_rle::compress(
//!     &mut Cursor::new(&data),
//!     &mut compressed,
//!     Level::Max,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(compressed, vec![255, 0x42, 45, 0x42]);
//!
//! let mut restored = Vec::new();
//! bytepress_rle::decompress(&mut Cursor::new(&compressed), &mut restored).unwrap();
//! assert_eq!(restored, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod encoder;

pub use decoder::decompress;
pub use encoder::compress;
