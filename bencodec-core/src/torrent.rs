//! Text view of decoded torrent metadata
//!
//! Converts byte strings to text under a chosen encoding. The `pieces` entry
//! of a dictionary holds concatenated SHA-1 digests and is kept as raw bytes.

use crate::constants::PIECES_KEY;
use crate::int::BInt;
use crate::text::TextEncoding;
use crate::value::Value;
use crate::Result;
use bytes::Bytes;
use indexmap::IndexMap;

/// A decoded value with its byte strings converted to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValue {
    /// An integer, unchanged.
    Integer(BInt),
    /// A byte string converted to text.
    Text(String),
    /// A byte string left raw (the `pieces` field).
    Bytes(Bytes),
    /// A list of converted values.
    List(Vec<TextValue>),
    /// A dictionary with text keys, in the original order.
    Dict(IndexMap<String, TextValue>),
}

impl TextValue {
    /// Returns the text, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a key if this is a dictionary
    pub fn get(&self, key: &str) -> Option<&TextValue> {
        match self {
            TextValue::Dict(d) => d.get(key),
            _ => None,
        }
    }
}

/// Convert a decoded value into its text view
///
/// Fails with an encoding error on the first byte string (or key) that is not
/// valid under `encoding`, except for `pieces` values.
///
/// ```
/// use bencodec_core::{decode, torrent_decode, TextEncoding};
///
/// let value = decode(b"d4:name4:demo6:pieces2:\xff\x00e").unwrap();
/// let text = torrent_decode(&value, TextEncoding::Utf8).unwrap();
/// assert_eq!(text.get("name").and_then(|v| v.as_text()), Some("demo"));
/// ```
pub fn torrent_decode(value: &Value, encoding: TextEncoding) -> Result<TextValue> {
    Ok(match value {
        Value::Integer(i) => TextValue::Integer(i.clone()),
        Value::Bytes(b) => TextValue::Text(encoding.decode(b)?.into_owned()),
        Value::List(items) => TextValue::List(
            items
                .iter()
                .map(|item| torrent_decode(item, encoding))
                .collect::<Result<_>>()?,
        ),
        Value::Dict(entries) => {
            let mut dict = IndexMap::with_capacity(entries.len());
            for (key, val) in entries {
                let converted = match val {
                    Value::Bytes(raw) if key.as_ref() == PIECES_KEY => TextValue::Bytes(raw.clone()),
                    other => torrent_decode(other, encoding)?,
                };
                dict.insert(encoding.decode(key)?.into_owned(), converted);
            }
            TextValue::Dict(dict)
        }
    })
}
