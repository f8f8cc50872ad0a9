use std::fs;
use tempfile::tempdir;

use bencodec_cli::{
    commands::{decode, encode},
    DecodeMode,
};
use bencodec_core::constants::DEFAULT_MAX_DEPTH;
use bencodec_core::TextEncoding;
use serde_json::json;

#[test]
fn decode_to_file_raw() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("in.bencode");
    let out_path = td.path().join("out.json");

    fs::write(&in_path, b"d4:name4:demo6:pieces2:\xff\x005:sizesli1ei-2eee").unwrap();

    decode::execute(
        in_path.to_str().unwrap(),
        Some(out_path.to_str().unwrap()),
        DecodeMode::Raw,
        TextEncoding::Utf8,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({"name": "demo", "pieces": {"$hex": "ff00"}, "sizes": [1, -2]})
    );
}

#[test]
fn decode_torrent_mode_latin1() {
    let json = decode::decode_to_json(
        b"d4:name4:caf\xe96:pieces2:\xe9\xe9e",
        DecodeMode::Torrent,
        TextEncoding::Latin1,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();

    assert_eq!(json, json!({"name": "café", "pieces": {"$hex": "e9e9"}}));
}

#[test]
fn decode_torrent_mode_rejects_bad_text() {
    let result = decode::decode_to_json(
        b"d4:name2:\xff\xfee",
        DecodeMode::Torrent,
        TextEncoding::Utf8,
        DEFAULT_MAX_DEPTH,
    );
    assert!(result.is_err());

    // Raw mode falls back to hex instead
    let json = decode::decode_to_json(
        b"d4:name2:\xff\xfee",
        DecodeMode::Raw,
        TextEncoding::Utf8,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();
    assert_eq!(json, json!({"name": {"$hex": "fffe"}}));
}

#[test]
fn decode_respects_max_depth() {
    let nested = b"llleee";
    assert!(
        decode::decode_to_json(nested, DecodeMode::Raw, TextEncoding::Utf8, 3).is_ok()
    );
    assert!(
        decode::decode_to_json(nested, DecodeMode::Raw, TextEncoding::Utf8, 2).is_err()
    );
}

#[test]
fn decode_rejects_trailing_content() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("in.bencode");
    fs::write(&in_path, b"i1ei2e").unwrap();

    let err = decode::execute(
        in_path.to_str().unwrap(),
        None,
        DecodeMode::Raw,
        TextEncoding::Utf8,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap_err();

    assert!(err.to_string().contains("Failed to decode"));
}

#[test]
fn decode_big_integer_tagged() {
    let json = decode::decode_to_json(
        b"i123456789012345678901234567890e",
        DecodeMode::Raw,
        TextEncoding::Utf8,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();
    assert_eq!(json, json!({"$int": "123456789012345678901234567890"}));
}

#[test]
fn decode_then_encode_reproduces_input() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("in.bencode");
    let json_path = td.path().join("value.json");
    let out_path = td.path().join("out.bencode");

    // Wide integer, binary key, a real "$hex" key and binary payload; keys in JSON map order
    let original: &[u8] = b"d4:$hex4:00ff2:\xff\xfei1e4:sizei99999999999999999999e5:valuel2:\x00\x01ee";
    fs::write(&in_path, original).unwrap();

    decode::execute(
        in_path.to_str().unwrap(),
        Some(json_path.to_str().unwrap()),
        DecodeMode::Raw,
        TextEncoding::Utf8,
        DEFAULT_MAX_DEPTH,
    )
    .unwrap();

    encode::execute(
        json_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        TextEncoding::Utf8,
        /*sort_keys*/ false,
    )
    .unwrap();

    assert_eq!(fs::read(&out_path).unwrap(), original);
}
