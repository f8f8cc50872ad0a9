//! Error types for bencode operations

use crate::text::TextEncoding;
use serde::{Deserialize, Serialize};

/// Errors that can occur while decoding or encoding bencode values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BencodeError {
    /// A value of the wrong shape was supplied or produced
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Shape required at this position.
        expected: &'static str,
        /// Shape actually encountered.
        found: &'static str,
    },

    /// Leading byte matches no grammar production
    #[error("Malformed input at offset {offset}: unexpected byte 0x{byte:02x}")]
    UnexpectedByte {
        /// Position of the offending byte.
        offset: usize,
        /// The byte itself.
        byte: u8,
    },

    /// Integer body is not an optional minus followed by decimal digits
    #[error("Malformed input at offset {offset}: invalid integer")]
    InvalidInteger {
        /// Position of the leading `i`.
        offset: usize,
    },

    /// Byte-string length prefix is not terminated by `:` or does not fit in memory
    #[error("Malformed input at offset {offset}: invalid byte string length")]
    InvalidLength {
        /// Position of the first length digit.
        offset: usize,
    },

    /// Input ended before the current production was complete
    #[error("Malformed input at offset {offset}: truncated, {needed} more byte(s) required")]
    Truncated {
        /// Position where more input was required.
        offset: usize,
        /// Minimum number of missing bytes.
        needed: usize,
    },

    /// A complete value was decoded but bytes remain after it
    #[error("Trailing content: {remaining} byte(s) after the value ending at offset {offset}")]
    TrailingContent {
        /// Position of the first unconsumed byte.
        offset: usize,
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// Container nesting exceeds the configured limit
    #[error("Nesting depth exceeds limit of {limit}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// Text could not be converted under the selected encoding
    #[error("Text is not representable as {encoding} (position {position})")]
    Encoding {
        /// Encoding in effect.
        encoding: TextEncoding,
        /// Byte or character index of the first failure.
        position: usize,
    },

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(String),
}

/// Broad classification of a [`BencodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unsupported shape at the API boundary.
    TypeMismatch,
    /// Bytes do not match the grammar at the current position.
    Malformed,
    /// Extra bytes after a complete value.
    TrailingContent,
    /// Nesting limit hit.
    DepthExceeded,
    /// Text encoding failure.
    Encoding,
    /// Reader failure.
    Io,
}

impl BencodeError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BencodeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            BencodeError::UnexpectedByte { .. }
            | BencodeError::InvalidInteger { .. }
            | BencodeError::InvalidLength { .. }
            | BencodeError::Truncated { .. } => ErrorKind::Malformed,
            BencodeError::TrailingContent { .. } => ErrorKind::TrailingContent,
            BencodeError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            BencodeError::Encoding { .. } => ErrorKind::Encoding,
            BencodeError::Io(_) => ErrorKind::Io,
        }
    }

    /// Byte offset in the input the error refers to, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            BencodeError::UnexpectedByte { offset, .. }
            | BencodeError::InvalidInteger { offset }
            | BencodeError::InvalidLength { offset }
            | BencodeError::Truncated { offset, .. }
            | BencodeError::TrailingContent { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BencodeError {
    fn from(err: std::io::Error) -> Self {
        BencodeError::Io(err.to_string())
    }
}
