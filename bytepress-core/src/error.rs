//! Error types for BytePress operations.
//!
//! One error enum covers every fatal condition in the codec engine, the
//! container layer, and the encryption envelope. Errors are fatal within
//! the current operation; there are no retries at the codec layer.

use std::io;
use thiserror::Error;

/// The main error type for BytePress operations.
#[derive(Debug, Error)]
pub enum BytePressError {
    /// Invalid mode/algorithm/level combination or bad caller input.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoder ran out of input before the declared symbol or byte count.
    #[error("Truncated stream: expected {expected} more bytes")]
    Truncated {
        /// Number of bytes that were expected but not available.
        expected: u64,
    },

    /// Structurally invalid stream.
    #[error("Malformed stream: {message}")]
    Malformed {
        /// Description of the structural defect.
        message: String,
    },

    /// Key derivation, cipher init, or final-block failure (wrong password).
    #[error("Encryption failure: {message}")]
    Crypto {
        /// Description of the cryptographic failure.
        message: String,
    },

    /// Unknown algorithm tag in a container entry.
    #[error("Unsupported algorithm tag: {tag}")]
    Unsupported {
        /// The unrecognized wire tag.
        tag: u8,
    },
}

/// Result type alias for BytePress operations.
pub type Result<T> = std::result::Result<T, BytePressError>;

impl BytePressError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(expected: u64) -> Self {
        Self::Truncated { expected }
    }

    /// Create a malformed stream error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create an encryption failure error.
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Create an unsupported tag error.
    pub fn unsupported(tag: u8) -> Self {
        Self::Unsupported { tag }
    }
}
