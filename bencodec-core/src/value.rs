//! The bencode value model

use crate::int::BInt;
use bytes::Bytes;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Dictionary with byte-string keys, iterated in insertion order
pub type Dict = IndexMap<Bytes, Value>;

/// A bencode value.
///
/// Bencode has four shapes: integers, byte strings, lists and dictionaries.
/// Byte strings are raw bytes; no text encoding is assumed. Dictionaries keep
/// the order in which keys were decoded or inserted.
///
/// # Examples
///
/// ```
/// use bencodec_core::Value;
///
/// let int: Value = 42i64.into();
/// let string = Value::string("hello");
/// let list = Value::List(vec![int.clone(), string.clone()]);
///
/// assert_eq!(int.as_i64(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert_eq!(list.as_list().map(Vec::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed integer of unbounded width.
    Integer(BInt),
    /// A byte string (may or may not be valid text).
    Bytes(Bytes),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte-string keys, in insertion order.
    Dict(Dict),
}

impl Value {
    /// Creates a byte string value from UTF-8 text
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates a byte string value from a static byte slice without copying
    pub fn from_static(bytes: &'static [u8]) -> Self {
        Value::Bytes(Bytes::from_static(bytes))
    }

    /// Creates an empty dictionary
    pub fn dict() -> Self {
        Value::Dict(Dict::new())
    }

    /// Name of this value's shape, as used in error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Returns the integer, if this is one
    pub fn as_integer(&self) -> Option<&BInt> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Returns the integer narrowed to `i64`, if this is one and it fits
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(BInt::to_i64)
    }

    /// Returns the byte string, if this is one
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the byte string as UTF-8 text.
    ///
    /// Returns `None` if this is not a byte string or the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the list, if this is one
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the dictionary, if this is one
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one
    pub fn into_dict(self) -> Option<Dict> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the list, if it is one
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Looks up a key if this is a dictionary
    ///
    /// ```
    /// use bencodec_core::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<BInt> for Value {
    fn from(i: BInt) -> Self {
        Value::Integer(i)
    }
}

macro_rules! impl_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Integer(BInt::from(i))
                }
            }
        )*
    };
}

impl_value_from_int!(i32, i64, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d.into_iter().collect())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

impl FromIterator<(Bytes, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (Bytes, Value)>>(iter: I) -> Self {
        Value::Dict(iter.into_iter().collect())
    }
}
