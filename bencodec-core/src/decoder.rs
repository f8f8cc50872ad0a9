//! Bencode decoding

use crate::constants::{
    DEFAULT_MAX_DEPTH, DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START, MINUS,
};
use crate::error::BencodeError;
use crate::value::{Dict, Value};
use crate::Result;
use bytes::Bytes;
use std::io::Read;

#[cfg(feature = "logging")]
use tracing::debug;

/// Decode exactly one bencoded value with the default options
///
/// Fails if the input is not a single complete value, or if bytes remain
/// after it.
///
/// ```
/// use bencodec_core::{decode, Value};
///
/// let value = decode(b"d3:keyl1:a1:bee").unwrap();
/// let list = value.get(b"key").and_then(Value::as_list).unwrap();
/// assert_eq!(list, &vec![Value::string("a"), Value::string("b")]);
/// ```
pub fn decode(data: &[u8]) -> Result<Value> {
    Decoder::new().decode(data)
}

/// Configurable decoder
///
/// A `Decoder` holds options only; every call parses with its own cursor, so a
/// single decoder can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder with the default nesting limit
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum container nesting depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured nesting limit
    pub fn depth_limit(&self) -> usize {
        self.max_depth
    }

    /// Decode exactly one value; trailing bytes are an error
    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        let mut parser = Parser::new(data, None, self.max_depth);
        let value = parser.parse_value(0)?;
        parser.finish()?;
        Ok(value)
    }

    /// Decode one value from the front of `data`, returning it with the unconsumed rest
    pub fn decode_prefix<'a>(&self, data: &'a [u8]) -> Result<(Value, &'a [u8])> {
        let mut parser = Parser::new(data, None, self.max_depth);
        let value = parser.parse_value(0)?;
        Ok((value, &data[parser.pos..]))
    }

    /// Decode exactly one value from a shared buffer without copying byte strings
    ///
    /// Byte strings in the result are slices of `buf`.
    pub fn decode_shared(&self, buf: Bytes) -> Result<Value> {
        let mut parser = Parser::new(&buf, Some(&buf), self.max_depth);
        let value = parser.parse_value(0)?;
        parser.finish()?;
        Ok(value)
    }

    /// Read `reader` to the end and decode exactly one value
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<Value> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;

        #[cfg(feature = "logging")]
        debug!("Read {} bytes for decoding", buf.len());

        self.decode_shared(Bytes::from(buf))
    }

    /// Decode one value starting at `offset`, returning it and the offset just past it
    pub(crate) fn decode_at(&self, data: &[u8], offset: usize) -> Result<(Value, usize)> {
        let mut parser = Parser::new(data, None, self.max_depth);
        parser.pos = offset;
        let value = parser.parse_value(0)?;
        Ok((value, parser.pos))
    }
}

/// Cursor over one input, scoped to a single decode call
struct Parser<'a> {
    data: &'a [u8],
    shared: Option<&'a Bytes>,
    pos: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8], shared: Option<&'a Bytes>, max_depth: usize) -> Self {
        Self {
            data,
            shared,
            pos: 0,
            max_depth,
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.data.len() {
            return Err(BencodeError::TrailingContent {
                offset: self.pos,
                remaining: self.data.len() - self.pos,
            });
        }
        Ok(())
    }

    fn peek(&self) -> Result<u8> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::Truncated {
                offset: self.pos,
                needed: 1,
            })
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        match self.peek()? {
            INTEGER_START => self.parse_integer(),
            b'0'..=b'9' => self.parse_bytes().map(Value::Bytes),
            LIST_START => self.parse_list(depth),
            DICT_START => self.parse_dict(depth),
            byte => Err(BencodeError::UnexpectedByte {
                offset: self.pos,
                byte,
            }),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(BencodeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(depth)
    }

    fn parse_integer(&mut self) -> Result<Value> {
        let start = self.pos;
        let body_start = start + 1;

        let end = memchr::memchr(END, &self.data[body_start..])
            .map(|i| body_start + i)
            .ok_or(BencodeError::Truncated {
                offset: self.data.len(),
                needed: 1,
            })?;

        let body = &self.data[body_start..end];
        let (negative, digits) = match body.split_first() {
            Some((&MINUS, rest)) => (true, rest),
            _ => (false, body),
        };

        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(BencodeError::InvalidInteger { offset: start });
        }

        self.pos = end + 1;
        Ok(Value::Integer(crate::int::BInt::from_digits(negative, digits)))
    }

    fn parse_bytes(&mut self) -> Result<Bytes> {
        let start = self.pos;

        let digits_len = self.data[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        let sep = start + digits_len;

        match self.data.get(sep) {
            Some(&LENGTH_SEPARATOR) => {}
            Some(_) => return Err(BencodeError::InvalidLength { offset: start }),
            None => {
                return Err(BencodeError::Truncated {
                    offset: sep,
                    needed: 1,
                })
            }
        }

        let len = self.data[start..sep]
            .iter()
            .try_fold(0usize, |acc, &d| {
                acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
            })
            .ok_or(BencodeError::InvalidLength { offset: start })?;

        let payload_start = sep + 1;
        let available = self.data.len() - payload_start;
        if len > available {
            return Err(BencodeError::Truncated {
                offset: self.data.len(),
                needed: len - available,
            });
        }

        let payload_end = payload_start + len;
        self.pos = payload_end;

        Ok(match self.shared {
            Some(buf) => buf.slice(payload_start..payload_end),
            None => Bytes::copy_from_slice(&self.data[payload_start..payload_end]),
        })
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        self.pos += 1;

        let mut list = Vec::new();
        while self.peek()? != END {
            list.push(self.parse_value(depth)?);
        }

        self.pos += 1;
        Ok(Value::List(list))
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value> {
        let depth = self.enter(depth)?;
        self.pos += 1;

        let mut dict = Dict::new();
        while self.peek()? != END {
            let key = match self.parse_value(depth)? {
                Value::Bytes(key) => key,
                other => {
                    return Err(BencodeError::TypeMismatch {
                        expected: "byte string dictionary key",
                        found: other.type_name(),
                    })
                }
            };

            let value = self.parse_value(depth)?;
            // A repeated key keeps its first position and takes the last value
            dict.insert(key, value);
        }

        self.pos += 1;
        Ok(Value::Dict(dict))
    }
}
