use crate::read_input;
use anyhow::{Context, Result};
use bencodec_core::{Encoder, TextEncoding};
use std::fs;
use tracing::info;

pub fn execute(input: &str, output: &str, encoding: TextEncoding, sort_keys: bool) -> Result<()> {
    info!("Encoding {} to {}", input, output);

    let content = read_input(input)?;
    let document: serde_json::Value =
        serde_json::from_slice(&content).with_context(|| "Failed to parse JSON input")?;

    let encoded = Encoder::new()
        .encoding(encoding)
        .sort_keys(sort_keys)
        .encode(&document)
        .with_context(|| format!("Failed to encode {}", input))?;

    fs::write(output, &encoded)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!("Wrote {} bytes ({} encoding)", encoded.len(), encoding);

    Ok(())
}
