//! Library entry for bencodec-cli used by integration tests and embedding.

pub mod commands;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};

// Re-export commands for convenience
pub use commands::*;

/// How decoded values are rendered as JSON
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DecodeMode {
    /// Byte strings as text when valid UTF-8, hex otherwise
    #[default]
    Raw,
    /// Torrent text view: every string decoded, `pieces` kept as hex
    Torrent,
}

/// Read a whole input file, or stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}
