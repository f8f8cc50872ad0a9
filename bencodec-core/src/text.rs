//! Text encodings used when converting between byte strings and text

use crate::error::BencodeError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Character encoding applied to text on encode and to byte strings by the
/// torrent transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    /// UTF-8
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
    /// 7-bit ASCII
    Ascii,
}

impl TextEncoding {
    /// Canonical label
    pub const fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Convert text to bytes under this encoding
    ///
    /// UTF-8 borrows the input. On failure, `position` is the index of the
    /// first character that cannot be represented.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, BencodeError> {
        match self {
            TextEncoding::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            TextEncoding::Ascii => {
                if text.is_ascii() {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                let position = text.chars().take_while(char::is_ascii).count();
                Err(self.error(position))
            }
            TextEncoding::Latin1 => {
                if text.is_ascii() {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                let mut out = Vec::with_capacity(text.len());
                for (position, c) in text.chars().enumerate() {
                    let code = u32::from(c);
                    if code > 0xFF {
                        return Err(self.error(position));
                    }
                    out.push(code as u8);
                }
                Ok(Cow::Owned(out))
            }
        }
    }

    /// Convert bytes to text under this encoding
    ///
    /// On failure, `position` is the offset of the first invalid byte.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, BencodeError> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| self.error(e.valid_up_to())),
            TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(position) => Err(self.error(position)),
                // ASCII is a subset of UTF-8
                None => std::str::from_utf8(bytes)
                    .map(Cow::Borrowed)
                    .map_err(|e| self.error(e.valid_up_to())),
            },
            TextEncoding::Latin1 => {
                if bytes.is_ascii() {
                    if let Ok(text) = std::str::from_utf8(bytes) {
                        return Ok(Cow::Borrowed(text));
                    }
                }
                Ok(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()))
            }
        }
    }

    fn error(&self, position: usize) -> BencodeError {
        BencodeError::Encoding {
            encoding: *self,
            position,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when an encoding label is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown text encoding: {0}")]
pub struct UnknownEncoding(pub String);

impl FromStr for TextEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase().replace('_', "-");
        match label.as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" | "l1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}
