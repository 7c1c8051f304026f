//! Decode errors

use thiserror::Error;

/// A wire frame that cannot be interpreted.
///
/// Values that are well-formed but semantically odd (battery above 100 %,
/// the reserved press state, unknown flag bits) are *not* errors; they are
/// handed to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedPacket {
    /// The text is not valid standard base64.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Fewer bytes than the fixed header.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    TooShort {
        /// Minimum length for this frame kind
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },

    /// A varint ran off the end of the buffer.
    #[error("truncated varint at byte {offset}")]
    TruncatedVarint {
        /// Offset where the varint started
        offset: usize,
    },

    /// A varint kept its continuation bit set past ten bytes.
    #[error("varint at byte {offset} exceeds 10 bytes")]
    VarintOverflow {
        /// Offset where the varint started
        offset: usize,
    },
}

impl MalformedPacket {
    /// Create a too-short error
    pub fn too_short(expected: usize, actual: usize) -> Self {
        MalformedPacket::TooShort { expected, actual }
    }

    /// Byte offset the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            MalformedPacket::TruncatedVarint { offset }
            | MalformedPacket::VarintOverflow { offset } => Some(*offset),
            MalformedPacket::Base64(_) | MalformedPacket::TooShort { .. } => None,
        }
    }
}

/// Specialized Result type for decode operations
pub type ProtocolResult<T> = std::result::Result<T, MalformedPacket>;
