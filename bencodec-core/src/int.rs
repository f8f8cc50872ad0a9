//! Arbitrary-precision integers as carried by bencode

use core::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A signed integer of unbounded width.
///
/// Stored as normalized decimal text: no leading zeros, and zero is never
/// negative. The bencode grammar carries integers in decimal, so the value can
/// be read and re-emitted without any width limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BInt {
    repr: String,
}

/// Error returned when parsing a [`BInt`] from text fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid integer literal: {0:?}")]
pub struct ParseBIntError(String);

impl BInt {
    /// Zero
    pub fn zero() -> Self {
        Self {
            repr: String::from("0"),
        }
    }

    /// Build from an optional minus sign and a non-empty run of ASCII digits.
    ///
    /// Leading zeros and `-0` are accepted and normalized away.
    pub(crate) fn from_digits(negative: bool, digits: &[u8]) -> Self {
        debug_assert!(!digits.is_empty() && digits.iter().all(u8::is_ascii_digit));

        let significant = match digits.iter().position(|&d| d != b'0') {
            Some(first) => &digits[first..],
            None => return Self::zero(),
        };

        let mut repr = String::with_capacity(significant.len() + usize::from(negative));
        if negative {
            repr.push('-');
        }
        // Digits are ASCII
        repr.extend(significant.iter().map(|&d| char::from(d)));
        Self { repr }
    }

    /// Decimal text, e.g. `"-42"`
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.repr.starts_with('-')
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.repr == "0"
    }

    /// Narrow to `i64`, if it fits
    pub fn to_i64(&self) -> Option<i64> {
        self.repr.parse().ok()
    }

    /// Narrow to `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        self.repr.parse().ok()
    }

    fn magnitude(&self) -> &str {
        self.repr.trim_start_matches('-')
    }
}

impl Default for BInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for BInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for BInt {
    type Err = ParseBIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let (negative, digits) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, bytes),
        };

        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(ParseBIntError(s.to_string()));
        }

        Ok(Self::from_digits(negative, digits))
    }
}

impl Ord for BInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (negative, _) => {
                let (a, b) = (self.magnitude(), other.magnitude());
                let by_magnitude = a.len().cmp(&b.len()).then_with(|| a.cmp(b));
                if negative {
                    by_magnitude.reverse()
                } else {
                    by_magnitude
                }
            }
        }
    }
}

impl PartialOrd for BInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BInt {
                fn from(value: $t) -> Self {
                    Self { repr: value.to_string() }
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

impl TryFrom<&BInt> for i64 {
    type Error = ParseBIntError;

    fn try_from(value: &BInt) -> Result<Self, Self::Error> {
        value
            .to_i64()
            .ok_or_else(|| ParseBIntError(value.repr.clone()))
    }
}
