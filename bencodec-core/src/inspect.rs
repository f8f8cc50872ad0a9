//! Structural statistics and canonical-form checks

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::value::Value;
use crate::Result;
use serde::Serialize;

/// Shape summary of a value tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueStats {
    /// Number of integers
    pub integers: usize,

    /// Number of byte strings, dictionary keys excluded
    pub byte_strings: usize,

    /// Number of lists
    pub lists: usize,

    /// Number of dictionaries
    pub dicts: usize,

    /// Number of dictionary keys
    pub keys: usize,

    /// Deepest container nesting (0 for a scalar)
    pub max_depth: usize,

    /// Sum of byte-string payload lengths, keys included
    pub payload_bytes: usize,

    /// Dictionaries whose keys are not in ascending raw-byte order
    pub unsorted_dicts: usize,
}

impl ValueStats {
    /// Walk `value` and collect statistics
    pub fn collect(value: &Value) -> Self {
        let mut stats = Self::default();
        stats.visit(value, 0);
        stats
    }

    /// Whether every dictionary has its keys in raw-byte order
    pub fn keys_sorted(&self) -> bool {
        self.unsorted_dicts == 0
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        self.max_depth = self.max_depth.max(depth);

        match value {
            Value::Integer(_) => self.integers += 1,
            Value::Bytes(b) => {
                self.byte_strings += 1;
                self.payload_bytes += b.len();
            }
            Value::List(items) => {
                self.lists += 1;
                for item in items {
                    self.visit(item, depth + 1);
                }
            }
            Value::Dict(entries) => {
                self.dicts += 1;
                self.keys += entries.len();

                let sorted = entries
                    .keys()
                    .zip(entries.keys().skip(1))
                    .all(|(a, b)| a <= b);
                if !sorted {
                    self.unsorted_dicts += 1;
                }

                for (key, val) in entries {
                    self.payload_bytes += key.len();
                    self.visit(val, depth + 1);
                }
            }
        }
    }
}

/// Whether `data` is exactly one value whose re-encoding reproduces it byte for byte
///
/// Non-canonical integers (`i-0e`, `i007e`) and repeated dictionary keys make
/// this false; malformed input is an error.
pub fn is_canonical(data: &[u8], decoder: Decoder) -> Result<bool> {
    let value = decoder.decode(data)?;
    let encoded = Encoder::new()
        .max_depth(decoder.depth_limit())
        .encode(&value)?;
    Ok(encoded.as_ref() == data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn test_scalar_stats() {
        let stats = ValueStats::collect(&Value::from(5i64));
        assert_eq!(stats.integers, 1);
        assert_eq!(stats.max_depth, 0);
        assert!(stats.keys_sorted());
    }

    #[test]
    fn test_nested_stats() {
        let value = decode(b"d1:ali1e2:bce1:bd1:c3:xyzee").unwrap();
        let stats = ValueStats::collect(&value);

        assert_eq!(stats.dicts, 2);
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.integers, 1);
        assert_eq!(stats.byte_strings, 2);
        assert_eq!(stats.keys, 3);
        assert_eq!(stats.max_depth, 2);
        // "bc" + "xyz" + keys "a", "b", "c"
        assert_eq!(stats.payload_bytes, 8);
        assert_eq!(stats.unsorted_dicts, 0);
    }

    #[test]
    fn test_unsorted_dicts_counted() {
        let value = decode(b"d1:bi1e1:ad1:zi0e1:yi0eee").unwrap();
        let stats = ValueStats::collect(&value);
        assert_eq!(stats.unsorted_dicts, 2);
        assert!(!stats.keys_sorted());
    }

    #[test]
    fn test_canonical_check() {
        assert!(is_canonical(b"d1:ai1ee", Decoder::new()).unwrap());
        assert!(is_canonical(b"d1:bi1e1:ai1ee", Decoder::new()).unwrap());
        assert!(!is_canonical(b"i-0e", Decoder::new()).unwrap());
        assert!(!is_canonical(b"i007e", Decoder::new()).unwrap());
        assert!(!is_canonical(b"d1:ai1e1:ai2ee", Decoder::new()).unwrap());
        assert!(is_canonical(b"i1", Decoder::new()).is_err());
    }

    #[test]
    fn test_canonical_check_uses_decoder_depth() {
        let depth = 300;
        let mut data = vec![b'l'; depth];
        data.extend(std::iter::repeat(b'e').take(depth));

        assert!(is_canonical(&data, Decoder::new()).is_err());
        assert!(is_canonical(&data, Decoder::new().max_depth(1000)).unwrap());
        assert!(is_canonical(&data, Decoder::new().max_depth(depth)).unwrap());
    }
}
