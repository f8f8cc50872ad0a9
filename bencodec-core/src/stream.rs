//! Iteration over concatenated bencode values

use crate::decoder::Decoder;
use crate::error::BencodeError;
use crate::value::Value;
use crate::Result;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// A value found at a specific offset in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedValue {
    /// Byte offset where the value starts
    pub offset: usize,

    /// Encoded size of the value in bytes
    pub size: usize,

    /// The decoded value
    pub value: Value,
}

/// Iterator over back-to-back values in one buffer
///
/// Yields each value with its position. After the first error the iterator
/// yields that error once and then ends; nothing past a malformed value is
/// reported.
pub struct ValueStream<'a> {
    data: &'a [u8],
    pos: usize,
    decoder: Decoder,
    failed: bool,
}

/// Iterate over the values in `data` using the default decoder
///
/// ```
/// use bencodec_core::stream::decode_stream;
///
/// let values: Vec<_> = decode_stream(b"i1e4:spamle")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values.len(), 3);
/// assert_eq!(values[1].offset, 3);
/// ```
pub fn decode_stream(data: &[u8]) -> ValueStream<'_> {
    ValueStream::new(data, Decoder::new())
}

impl<'a> ValueStream<'a> {
    /// Iterate over `data` with a specific decoder
    pub fn new(data: &'a [u8], decoder: Decoder) -> Self {
        #[cfg(feature = "logging")]
        debug!("Starting stream decode of {} bytes", data.len());

        Self {
            data,
            pos: 0,
            decoder,
            failed: false,
        }
    }

    /// Offset of the next unread byte
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for ValueStream<'_> {
    type Item = Result<LocatedValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.data.len() {
            return None;
        }

        let offset = self.pos;
        match self.decoder.decode_at(self.data, offset) {
            Ok((value, end)) => {
                #[cfg(feature = "logging")]
                debug!(
                    "Decoded {} at offset {} ({} bytes)",
                    value.type_name(),
                    offset,
                    end - offset
                );

                self.pos = end;
                Some(Ok(LocatedValue {
                    offset,
                    size: end - offset,
                    value,
                }))
            }
            Err(e) => {
                #[cfg(feature = "logging")]
                warn!("Failed to decode value at offset {}: {}", offset, e);

                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Stream statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Total bytes in the input
    pub bytes_total: usize,

    /// Number of values decoded
    pub values_decoded: usize,

    /// Bytes covered by decoded values
    pub bytes_decoded: usize,

    /// The error that stopped decoding, if any
    pub error: Option<BencodeError>,
}

impl StreamStats {
    /// Share of the input covered by decoded values, as a percentage
    pub fn coverage(&self) -> f64 {
        if self.bytes_total == 0 {
            0.0
        } else {
            (self.bytes_decoded as f64 / self.bytes_total as f64) * 100.0
        }
    }

    /// Whether every byte of the input was decoded
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.bytes_decoded == self.bytes_total
    }
}

/// Decode every value in `data`, collecting statistics
pub fn decode_stream_with_stats(
    data: &[u8],
    decoder: Decoder,
) -> (Vec<LocatedValue>, StreamStats) {
    let mut stats = StreamStats {
        bytes_total: data.len(),
        ..Default::default()
    };

    let mut values = Vec::new();
    for item in ValueStream::new(data, decoder) {
        match item {
            Ok(located) => {
                stats.values_decoded += 1;
                stats.bytes_decoded += located.size;
                values.push(located);
            }
            Err(e) => stats.error = Some(e),
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Stream decode complete: {} values, {} of {} bytes",
        stats.values_decoded, stats.bytes_decoded, stats.bytes_total
    );

    (values, stats)
}
