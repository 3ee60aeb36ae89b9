//! Compression algorithm and level identifiers.

use crate::error::{BytePressError, Result};

/// Compression algorithm selector.
///
/// `Rle` and `Huffman` are concrete codecs with wire tags; `Hybrid` is a
/// meta-codec that trial-runs both and resolves to one of them before any
/// header is emitted, so it never appears on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Bounded run-length coding.
    Rle,
    /// Two-pass static Huffman coding.
    Huffman,
    /// Trial both, keep the smaller output (compression only).
    Hybrid,
}

impl Algorithm {
    /// Wire tag recorded in container entries.
    ///
    /// `Hybrid` has no tag; callers must resolve it first.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Rle => 0,
            Self::Huffman => 1,
            Self::Hybrid => unreachable!("hybrid resolves before a tag is emitted"),
        }
    }

    /// Decode a wire tag from a container entry.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Rle),
            1 => Ok(Self::Huffman),
            _ => Err(BytePressError::unsupported(tag)),
        }
    }

    /// Get the algorithm name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rle => "RLE",
            Self::Huffman => "Huffman",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Compression intensity.
///
/// The level bounds the RLE run cap. Huffman currently ignores it; the
/// parameter is reserved for future variants and is still recorded in
/// container entries and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    /// Fastest, 64-byte run cap.
    Fast,
    /// Default, 128-byte run cap.
    #[default]
    Balanced,
    /// Best, 255-byte run cap.
    Max,
}

impl Level {
    /// Maximum RLE run length at this level.
    pub fn max_run(&self) -> u8 {
        match self {
            Self::Fast => 64,
            Self::Balanced => 128,
            Self::Max => 255,
        }
    }

    /// Wire tag recorded in container entries.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Fast => 0,
            Self::Balanced => 1,
            Self::Max => 2,
        }
    }

    /// Decode a wire tag from a container entry.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Self::Fast),
            1 => Ok(Self::Balanced),
            2 => Ok(Self::Max),
            _ => Err(BytePressError::unsupported(tag)),
        }
    }

    /// Get the level name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fast => "Fast",
            Self::Balanced => "Balanced",
            Self::Max => "Max",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
