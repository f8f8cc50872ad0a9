//! Fuzzing entry points for bencodec-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Call these from fuzz targets, e.g. `fuzz_target!(|data: &[u8]| fuzz_decode(data))`

use bencodec_core::{decode, encode, stream::decode_stream, torrent_decode, TextEncoding};

/// Decode arbitrary bytes; anything that decodes must re-encode and decode to the same value
pub fn fuzz_decode(data: &[u8]) {
    if let Ok(value) = decode(data) {
        let encoded = encode(&value).expect("decoded values always encode");
        let again = decode(&encoded).expect("encoder output always decodes");
        assert_eq!(again, value);
    }
}

/// Iterate a stream of values - should never panic
pub fn fuzz_stream(data: &[u8]) {
    for item in decode_stream(data) {
        if item.is_err() {
            break;
        }
    }
}

/// Run the torrent text view over anything that decodes - should never panic
pub fn fuzz_torrent(data: &[u8]) {
    if let Ok(value) = decode(data) {
        let _ = torrent_decode(&value, TextEncoding::Utf8);
        // Latin-1 maps every byte, so only the structure can fail
        assert!(torrent_decode(&value, TextEncoding::Latin1).is_ok());
    }
}
