use crate::{read_input, DecodeMode};
use anyhow::{Context, Result};
use bencodec_core::json::{text_value_to_json, value_to_json};
use bencodec_core::{torrent_decode, Decoder, TextEncoding};
use serde_json::Value as Json;
use std::fs;
use tracing::info;

pub fn execute(
    input: &str,
    output: Option<&str>,
    mode: DecodeMode,
    encoding: TextEncoding,
    max_depth: usize,
) -> Result<()> {
    info!("Decoding {}", input);

    let data = read_input(input)?;
    let json = decode_to_json(&data, mode, encoding, max_depth)
        .with_context(|| format!("Failed to decode {}", input))?;

    let rendered =
        serde_json::to_string_pretty(&json).with_context(|| "Failed to serialize JSON output")?;

    if let Some(output_path) = output {
        fs::write(output_path, rendered)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Decoded value written to: {}", output_path);
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Decode exactly one value and render it as JSON
pub fn decode_to_json(
    data: &[u8],
    mode: DecodeMode,
    encoding: TextEncoding,
    max_depth: usize,
) -> Result<Json> {
    let value = Decoder::new().max_depth(max_depth).decode(data)?;

    Ok(match mode {
        DecodeMode::Raw => value_to_json(&value),
        DecodeMode::Torrent => text_value_to_json(&torrent_decode(&value, encoding)?),
    })
}
