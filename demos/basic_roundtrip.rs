//! Basic encoding and decoding example

use bencodec_core::{decode, encode, inspect::ValueStats, Dict, Encoder, Value};
use bytes::Bytes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Bencodec Basic Round-Trip Example\n");

    // Build a small metainfo-like structure, keys deliberately out of order
    let mut info = Dict::new();
    info.insert(Bytes::from_static(b"name"), Value::string("example.txt"));
    info.insert(Bytes::from_static(b"length"), Value::from(1024i64));
    info.insert(Bytes::from_static(b"piece length"), Value::from(16384i64));

    let mut root = Dict::new();
    root.insert(Bytes::from_static(b"info"), Value::Dict(info));
    root.insert(
        Bytes::from_static(b"announce"),
        Value::string("http://tracker.example.com/announce"),
    );
    let value = Value::Dict(root);

    // Encode in insertion order
    let encoded = encode(&value)?;
    println!("Insertion order: {}", String::from_utf8_lossy(&encoded));

    // Encode with keys sorted by raw bytes
    let sorted = Encoder::new().sort_keys(true).encode(&value)?;
    println!("Sorted keys:     {}", String::from_utf8_lossy(&sorted));

    // Decode back
    let decoded = decode(&encoded)?;
    assert_eq!(decoded, value);

    let stats = ValueStats::collect(&decoded);
    println!(
        "\n{} dictionaries, {} keys, depth {}, {} unsorted",
        stats.dicts, stats.keys, stats.max_depth, stats.unsorted_dicts
    );

    std::fs::write("example_output.bencode", &encoded)?;
    println!("\nWrote {} bytes to example_output.bencode", encoded.len());
    println!("Use 'bencodec decode --input example_output.bencode' to read it back");

    Ok(())
}
