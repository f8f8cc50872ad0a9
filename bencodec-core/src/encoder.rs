//! Bencode encoding

use crate::constants::{
    DEFAULT_MAX_DEPTH, DEFAULT_TEXT_ENCODING, DICT_START, END, INTEGER_START, LENGTH_SEPARATOR,
    LIST_START,
};
use crate::error::BencodeError;
use crate::int::BInt;
use crate::text::TextEncoding;
use crate::value::Value;
use crate::Result;
use bytes::{BufMut, Bytes, BytesMut};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Encode a value with the default options
///
/// The output follows the bencode grammar:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, keys in iteration order
///
/// ```
/// use bencodec_core::{encode, Value};
///
/// let list = Value::List(vec![Value::from(1i64), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap().as_ref(), b"li1e3:twoe");
/// ```
pub fn encode(value: &Value) -> Result<Bytes> {
    Encoder::new().encode(value)
}

/// Encode anything bencode-shaped, converting text with `encoding`
///
/// ```
/// use bencodec_core::{encode_with, TextEncoding};
///
/// let encoded = encode_with(&vec!["café"], TextEncoding::Latin1).unwrap();
/// assert_eq!(encoded.as_ref(), b"l4:caf\xe9e");
/// ```
pub fn encode_with<T: ToBencode + ?Sized>(value: &T, encoding: TextEncoding) -> Result<Bytes> {
    Encoder::new().encoding(encoding).encode(value)
}

/// Types that can be written as a bencode value
pub trait ToBencode {
    /// Write this value through `emitter`
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()>;
}

/// Types usable as dictionary keys: raw bytes or text
pub trait DictKey {
    /// Key bytes, converting text with `encoding`
    fn key_bytes(&self, encoding: TextEncoding) -> Result<Cow<'_, [u8]>>;
}

/// Configurable encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    encoding: TextEncoding,
    max_depth: usize,
    sort_keys: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create an encoder: UTF-8 text, default nesting limit, dictionaries in iteration order
    pub fn new() -> Self {
        Self {
            encoding: DEFAULT_TEXT_ENCODING,
            max_depth: DEFAULT_MAX_DEPTH,
            sort_keys: false,
        }
    }

    /// Set the encoding applied to text values and text keys
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the maximum container nesting depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Emit dictionary keys sorted by raw bytes instead of in iteration order
    pub fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Encode `value` into a fresh buffer
    pub fn encode<T: ToBencode + ?Sized>(&self, value: &T) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode_into(value, &mut buf)?;
        Ok(buf.freeze())
    }

    /// Append the encoding of `value` to `buf`
    ///
    /// On error `buf` is restored to its original length.
    pub fn encode_into<T: ToBencode + ?Sized>(&self, value: &T, buf: &mut BytesMut) -> Result<()> {
        let mark = buf.len();
        let mut emitter = Emitter {
            buf: &mut *buf,
            encoding: self.encoding,
            sort_keys: self.sort_keys,
            depth: 0,
            max_depth: self.max_depth,
        };

        let result = value.write_bencode(&mut emitter);
        if result.is_err() {
            buf.truncate(mark);
        }
        result
    }
}

/// Output sink handed to [`ToBencode`] implementations
pub struct Emitter<'a> {
    buf: &'a mut BytesMut,
    encoding: TextEncoding,
    sort_keys: bool,
    depth: usize,
    max_depth: usize,
}

impl Emitter<'_> {
    /// Encoding applied to text
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Write `i<value>e`
    pub fn emit_integer<D: Display>(&mut self, value: D) {
        self.buf.put_u8(INTEGER_START);
        self.buf.put_slice(value.to_string().as_bytes());
        self.buf.put_u8(END);
    }

    /// Write `<len>:<bytes>`
    pub fn emit_bytes(&mut self, bytes: &[u8]) {
        self.buf.reserve(bytes.len() + 21);
        self.buf.put_slice(bytes.len().to_string().as_bytes());
        self.buf.put_u8(LENGTH_SEPARATOR);
        self.buf.put_slice(bytes);
    }

    /// Convert text with the active encoding and write it as a byte string
    pub fn emit_text(&mut self, text: &str) -> Result<()> {
        let bytes = self.encoding.encode(text)?;
        self.emit_bytes(&bytes);
        Ok(())
    }

    /// Write `l<items>e`
    pub fn emit_list<'v, I, T>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = &'v T>,
        T: ToBencode + ?Sized + 'v,
    {
        self.enter()?;
        self.buf.put_u8(LIST_START);
        for item in items {
            item.write_bencode(self)?;
        }
        self.buf.put_u8(END);
        self.leave();
        Ok(())
    }

    /// Write `d<key><value>...e`
    pub fn emit_dict<'v, I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'v K, &'v V)>,
        K: DictKey + ?Sized + 'v,
        V: ToBencode + ?Sized + 'v,
    {
        self.enter()?;
        self.buf.put_u8(DICT_START);

        if self.sort_keys {
            let mut sorted = entries
                .into_iter()
                .map(|(k, v)| Ok((k.key_bytes(self.encoding)?, v)))
                .collect::<Result<Vec<_>>>()?;
            sorted.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in sorted {
                self.emit_bytes(&key);
                value.write_bencode(self)?;
            }
        } else {
            for (key, value) in entries {
                let key = key.key_bytes(self.encoding)?;
                self.emit_bytes(&key);
                value.write_bencode(self)?;
            }
        }

        self.buf.put_u8(END);
        self.leave();
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(BencodeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

impl ToBencode for Value {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        match self {
            Value::Integer(i) => emitter.emit_integer(i),
            Value::Bytes(b) => emitter.emit_bytes(b),
            Value::List(l) => emitter.emit_list(l)?,
            Value::Dict(d) => emitter.emit_dict(d)?,
        }
        Ok(())
    }
}

impl ToBencode for BInt {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_integer(self);
        Ok(())
    }
}

macro_rules! impl_to_bencode_int {
    ($($t:ty),*) => {
        $(
            impl ToBencode for $t {
                fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
                    emitter.emit_integer(self);
                    Ok(())
                }
            }
        )*
    };
}

// u8 is left out so that byte slices are never mistaken for lists of integers
impl_to_bencode_int!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

impl ToBencode for str {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_text(self)
    }
}

impl ToBencode for String {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_text(self)
    }
}

impl ToBencode for [u8] {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_bytes(self);
        Ok(())
    }
}

impl ToBencode for Bytes {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_bytes(self);
        Ok(())
    }
}

impl<T: ToBencode> ToBencode for Vec<T> {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_list(self)
    }
}

impl<T: ToBencode, const N: usize> ToBencode for [T; N] {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_list(self)
    }
}

impl<K: DictKey, V: ToBencode, S> ToBencode for IndexMap<K, V, S> {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_dict(self)
    }
}

impl<K: DictKey, V: ToBencode> ToBencode for BTreeMap<K, V> {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        emitter.emit_dict(self)
    }
}

impl<T: ToBencode + ?Sized> ToBencode for &T {
    fn write_bencode(&self, emitter: &mut Emitter<'_>) -> Result<()> {
        (**self).write_bencode(emitter)
    }
}

impl DictKey for [u8] {
    fn key_bytes(&self, _encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl DictKey for Vec<u8> {
    fn key_bytes(&self, _encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl DictKey for Bytes {
    fn key_bytes(&self, _encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl DictKey for str {
    fn key_bytes(&self, encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        encoding.encode(self)
    }
}

impl DictKey for String {
    fn key_bytes(&self, encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        encoding.encode(self)
    }
}

impl<K: DictKey + ?Sized> DictKey for &K {
    fn key_bytes(&self, encoding: TextEncoding) -> Result<Cow<'_, [u8]>> {
        (**self).key_bytes(encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use crate::value::Dict;

    #[test]
    fn test_encode_integers() {
        assert_eq!(encode(&Value::from(42i64)).unwrap().as_ref(), b"i42e");
        assert_eq!(encode(&Value::from(-42i64)).unwrap().as_ref(), b"i-42e");
        assert_eq!(encode(&Value::from(0i64)).unwrap().as_ref(), b"i0e");
    }

    #[test]
    fn test_encode_big_integer() {
        let big: BInt = "-123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            encode(&Value::Integer(big)).unwrap().as_ref(),
            b"i-123456789012345678901234567890e"
        );
    }

    #[test]
    fn test_encode_bytes() {
        assert_eq!(
            encode(&Value::from_static(b"spam")).unwrap().as_ref(),
            b"4:spam"
        );
        assert_eq!(encode(&Value::from_static(b"")).unwrap().as_ref(), b"0:");
    }

    #[test]
    fn test_encode_list() {
        let list = Value::List(vec![Value::string("spam"), Value::from(42i64)]);
        assert_eq!(encode(&list).unwrap().as_ref(), b"l4:spami42ee");
    }

    #[test]
    fn test_encode_dict_iteration_order() {
        let mut dict = Dict::new();
        dict.insert(Bytes::from_static(b"zz"), Value::from(1i64));
        dict.insert(Bytes::from_static(b"aa"), Value::from(2i64));
        let value = Value::Dict(dict);

        assert_eq!(encode(&value).unwrap().as_ref(), b"d2:zzi1e2:aai2ee");
        assert_eq!(
            Encoder::new().sort_keys(true).encode(&value).unwrap().as_ref(),
            b"d2:aai2e2:zzi1ee"
        );
    }

    #[test]
    fn test_encode_native_types() {
        let mut map = IndexMap::new();
        map.insert("name", vec!["a", "b"]);
        assert_eq!(
            Encoder::new().encode(&map).unwrap().as_ref(),
            b"d4:namel1:a1:bee"
        );

        let tuple_like = [1u32, 2, 3];
        assert_eq!(
            Encoder::new().encode(&tuple_like).unwrap().as_ref(),
            b"li1ei2ei3ee"
        );

        let raw: &[u8] = b"\x00\xff";
        assert_eq!(Encoder::new().encode(raw).unwrap().as_ref(), b"2:\x00\xff");
    }

    #[test]
    fn test_encode_btreemap_with_byte_keys() {
        let mut map = BTreeMap::new();
        map.insert(b"b".to_vec(), 2i64);
        map.insert(b"a".to_vec(), 1i64);
        assert_eq!(
            Encoder::new().encode(&map).unwrap().as_ref(),
            b"d1:ai1e1:bi2ee"
        );
    }

    #[test]
    fn test_text_encoding_applies_to_keys() {
        let mut map = IndexMap::new();
        map.insert("é", "é");
        assert_eq!(
            encode_with(&map, TextEncoding::Utf8).unwrap().as_ref(),
            b"d2:\xc3\xa92:\xc3\xa9e"
        );
        assert_eq!(
            encode_with(&map, TextEncoding::Latin1).unwrap().as_ref(),
            b"d1:\xe91:\xe9e"
        );
        assert!(encode_with(&map, TextEncoding::Ascii).is_err());
    }

    #[test]
    fn test_encode_depth_limit() {
        let nested = Value::List(vec![Value::List(vec![Value::List(vec![])])]);
        assert!(Encoder::new().max_depth(3).encode(&nested).is_ok());
        assert_eq!(
            Encoder::new().max_depth(2).encode(&nested).unwrap_err(),
            BencodeError::DepthExceeded { limit: 2 }
        );
    }

    #[test]
    fn test_encode_into_restores_on_error() {
        let mut buf = BytesMut::from(&b"i1e"[..]);
        let err = Encoder::new()
            .encoding(TextEncoding::Ascii)
            .encode_into(&vec!["ok", "nö"], &mut buf);
        assert!(err.is_err());
        assert_eq!(buf.as_ref(), b"i1e");

        Encoder::new().encode_into(&"x", &mut buf).unwrap();
        assert_eq!(buf.as_ref(), b"i1e1:x");
    }

    #[test]
    fn test_round_trip_sorted_input() {
        let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
        let decoded = decode(original).unwrap();
        assert_eq!(encode(&decoded).unwrap().as_ref(), original);
    }

    #[test]
    fn test_round_trip_unsorted_input() {
        let original = b"d1:bi1e1:ale1:c0:e";
        let decoded = decode(original).unwrap();
        assert_eq!(encode(&decoded).unwrap().as_ref(), original);
    }
}
