//! # Bencodec Core
//!
//! Decoder and encoder for bencode, the length-prefixed serialization format
//! used by BitTorrent metadata.
//!
//! ## Modules
//!
//! - `constants`: Grammar tokens and limits
//! - `value`: The value model (`Value`, `Dict`)
//! - `int`: Unbounded integers
//! - `text`: Text encodings for byte-string conversion
//! - `decoder`: Recursive-descent decoding
//! - `encoder`: Encoding of values and native Rust types
//! - `torrent`: Text view with the `pieces` exemption
//! - `stream`: Iteration over concatenated values
//! - `inspect`: Structural statistics and canonical-form checks
//! - `json`: JSON bridge (feature `json`)

#![warn(missing_docs)]

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod inspect;
pub mod int;
#[cfg(feature = "json")]
pub mod json;
pub mod stream;
pub mod text;
pub mod torrent;
pub mod value;

// Re-export commonly used types
pub use decoder::{decode, Decoder};
pub use encoder::{encode, encode_with, DictKey, Emitter, Encoder, ToBencode};
pub use error::{BencodeError, ErrorKind};
pub use int::BInt;
pub use text::TextEncoding;
pub use torrent::{torrent_decode, TextValue};
pub use value::{Dict, Value};

/// Result type alias for bencode operations
pub type Result<T> = core::result::Result<T, BencodeError>;
