//! Grammar tokens and limits for the bencode format

use crate::text::TextEncoding;

/// Leading byte of an integer (`i<digits>e`)
pub const INTEGER_START: u8 = b'i';

/// Leading byte of a list (`l<values>e`)
pub const LIST_START: u8 = b'l';

/// Leading byte of a dictionary (`d<key><value>...e`)
pub const DICT_START: u8 = b'd';

/// Terminator shared by integers, lists and dictionaries
pub const END: u8 = b'e';

/// Separator between a byte-string length prefix and its payload
pub const LENGTH_SEPARATOR: u8 = b':';

/// Sign prefix accepted inside an integer body
pub const MINUS: u8 = b'-';

/// Default bound on container nesting, applied to both decode and encode.
///
/// The top-level value sits at depth 0; every list or dictionary adds one.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Dictionary key whose byte-string value is kept raw by the torrent transform
/// (concatenated SHA-1 piece hashes, not text)
pub const PIECES_KEY: &[u8] = b"pieces";

/// Text encoding used when none is supplied
pub const DEFAULT_TEXT_ENCODING: TextEncoding = TextEncoding::Utf8;
