//! Conversions between JSON documents and bencode values
//!
//! JSON has no byte-string type and no integers wider than 64 bits, so both
//! travel as single-entry tagged objects:
//!
//! - `{"$hex": "<lowercase hex>"}` holds raw bytes
//! - `{"$int": "<decimal>"}` holds an integer outside the `i64`/`u64` range
//!
//! Dictionary keys that are not UTF-8 are written as `"$hex:<hex>"`. Real keys
//! starting with `$` get one extra `$` so they never collide with a tag.
//! [`value_to_json`] followed by encoding reproduces the original bytes.

use crate::encoder::{DictKey, Emitter, ToBencode};
use crate::error::BencodeError;
use crate::int::BInt;
use crate::text::TextEncoding;
use crate::torrent::TextValue;
use crate::value::Value;
use crate::Result;
use serde_json::{Map, Number, Value as Json};
use std::borrow::Cow;

/// Object key marking hex-encoded raw bytes
pub const HEX_TAG: &str = "$hex";

/// Object key marking an integer too wide for a JSON number
pub const INT_TAG: &str = "$int";

/// Prefix of dictionary keys that are hex-encoded raw bytes
pub const HEX_KEY_PREFIX: &str = "$hex:";

const ESCAPE: char = '$';

impl ToBencode for Json {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        match self {
            Json::String(s) => emitter.emit_text(s),
            Json::Number(n) => write_number(n, emitter),
            Json::Array(items) => emitter.emit_list(items),
            Json::Object(map) => match tagged(map)? {
                Some(Tagged::Bytes(bytes)) => {
                    emitter.emit_bytes(&bytes);
                    Ok(())
                }
                Some(Tagged::Integer(int)) => {
                    emitter.emit_integer(&int);
                    Ok(())
                }
                None => {
                    let entries = map
                        .iter()
                        .map(|(k, v)| Ok((parse_key(k)?, v)))
                        .collect::<Result<Vec<_>>>()?;
                    emitter.emit_dict(entries.iter().map(|(k, v)| (k, *v)))
                }
            },
            Json::Bool(_) => Err(mismatch("boolean")),
            Json::Null => Err(mismatch("null")),
        }
    }
}

fn write_number(n: &Number, emitter: &mut Emitter<'_>) -> Result<()> {
    if let Some(i) = n.as_i64() {
        emitter.emit_integer(i);
    } else if let Some(u) = n.as_u64() {
        emitter.emit_integer(u);
    } else {
        return Err(mismatch("float"));
    }
    Ok(())
}

enum Tagged {
    Bytes(Vec<u8>),
    Integer(BInt),
}

fn tagged(map: &Map<String, Json>) -> Result<Option<Tagged>> {
    if map.len() != 1 {
        return Ok(None);
    }
    if let Some(payload) = map.get(HEX_TAG) {
        return tag_text(payload)
            .and_then(decode_hex)
            .map(|bytes| Some(Tagged::Bytes(bytes)));
    }
    if let Some(payload) = map.get(INT_TAG) {
        let int = tag_text(payload)?
            .parse::<BInt>()
            .map_err(|_| BencodeError::TypeMismatch {
                expected: "decimal integer",
                found: "non-integer string",
            })?;
        return Ok(Some(Tagged::Integer(int)));
    }
    Ok(None)
}

fn tag_text(payload: &Json) -> Result<&str> {
    match payload {
        Json::String(s) => Ok(s),
        _ => Err(BencodeError::TypeMismatch {
            expected: "string tag payload",
            found: "non-string",
        }),
    }
}

fn decode_hex(encoded: &str) -> Result<Vec<u8>> {
    hex::decode(encoded).map_err(|_| BencodeError::TypeMismatch {
        expected: "hex digits",
        found: "non-hex string",
    })
}

/// A JSON object key turned back into a bencode key
enum JsonKey<'a> {
    Text(&'a str),
    Raw(Vec<u8>),
}

impl DictKey for JsonKey<'_> {
    fn key_bytes(&self, encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        match self {
            JsonKey::Text(s) => encoding.encode(s),
            JsonKey::Raw(b) => Ok(Cow::Borrowed(b)),
        }
    }
}

fn parse_key(key: &str) -> Result<JsonKey<'_>> {
    if key.starts_with("$$") {
        Ok(JsonKey::Text(&key[1..]))
    } else if let Some(encoded) = key.strip_prefix(HEX_KEY_PREFIX) {
        decode_hex(encoded).map(JsonKey::Raw)
    } else {
        Ok(JsonKey::Text(key))
    }
}

fn mismatch(found: &'static str) -> BencodeError {
    BencodeError::TypeMismatch {
        expected: "integer, string, list or dictionary",
        found,
    }
}

/// Render a value as JSON
///
/// Byte strings that are valid UTF-8 become strings, others become
/// `{"$hex": ...}`. Integers that fit in 64 bits become numbers, wider ones
/// become `{"$int": ...}`. See the module docs for key escaping.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Integer(i) => integer_to_json(i),
        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => Json::String(s.to_string()),
            Err(_) => tag_object(HEX_TAG, hex::encode(b)),
        },
        Value::List(items) => Json::Array(items.iter().map(value_to_json).collect()),
        Value::Dict(entries) => Json::Object(
            entries
                .iter()
                .map(|(k, v)| {
                    let key = match std::str::from_utf8(k) {
                        Ok(s) => escape_key(s),
                        Err(_) => format!("{}{}", HEX_KEY_PREFIX, hex::encode(k)),
                    };
                    (key, value_to_json(v))
                })
                .collect(),
        ),
    }
}

/// Render a text view as JSON; raw `pieces` bytes become `{"$hex": ...}`
pub fn text_value_to_json(value: &TextValue) -> Json {
    match value {
        TextValue::Integer(i) => integer_to_json(i),
        TextValue::Text(s) => Json::String(s.clone()),
        TextValue::Bytes(b) => tag_object(HEX_TAG, hex::encode(b)),
        TextValue::List(items) => Json::Array(items.iter().map(text_value_to_json).collect()),
        TextValue::Dict(entries) => Json::Object(
            entries
                .iter()
                .map(|(k, v)| (escape_key(k), text_value_to_json(v)))
                .collect(),
        ),
    }
}

fn escape_key(key: &str) -> String {
    if key.starts_with(ESCAPE) {
        format!("{}{}", ESCAPE, key)
    } else {
        key.to_string()
    }
}

fn integer_to_json(int: &BInt) -> Json {
    if let Some(i) = int.to_i64() {
        Json::Number(i.into())
    } else if let Some(u) = int.to_u64() {
        Json::Number(u.into())
    } else {
        tag_object(INT_TAG, int.to_string())
    }
}

fn tag_object(tag: &str, payload: String) -> Json {
    let mut map = Map::new();
    map.insert(tag.to_string(), Json::String(payload));
    Json::Object(map)
}
