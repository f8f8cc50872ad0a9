//! Print the text view of a .torrent file
//!
//! Usage: cargo run --example torrent_dump -- path/to/file.torrent [encoding]

use bencodec_core::{torrent_decode, Decoder, TextEncoding, TextValue};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or("missing path to a .torrent file")?;
    let encoding: TextEncoding = match args.next() {
        Some(label) => label.parse()?,
        None => TextEncoding::default(),
    };

    let file = std::fs::File::open(&path)?;
    let value = Decoder::new().decode_reader(file)?;
    let text = torrent_decode(&value, encoding)?;

    print_value(&text, 0);
    Ok(())
}

fn print_value(value: &TextValue, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        TextValue::Integer(i) => println!("{}{}", pad, i),
        TextValue::Text(s) => println!("{}{:?}", pad, s),
        TextValue::Bytes(b) => println!("{}<{} raw bytes>", pad, b.len()),
        TextValue::List(items) => {
            for item in items {
                print_value(item, indent + 1);
            }
        }
        TextValue::Dict(entries) => {
            for (key, val) in entries {
                println!("{}{}:", pad, key);
                print_value(val, indent + 1);
            }
        }
    }
}
