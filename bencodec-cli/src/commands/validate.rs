use crate::read_input;
use anyhow::{Context, Result};
use bencodec_core::inspect::ValueStats;
use bencodec_core::{Decoder, Encoder, ErrorKind};
use colored::*;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of validating one input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Exactly one well-formed value, nothing after it
    pub valid: bool,

    /// Error category when the input did not decode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    /// Error message when the input did not decode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Re-encoding reproduces the input byte for byte
    pub canonical: bool,

    /// Every dictionary has its keys in raw-byte order
    pub keys_sorted: bool,

    /// Bytes after the first value
    pub trailing_bytes: usize,
}

/// Check `data` without printing anything
pub fn validate_bytes(data: &[u8], decoder: Decoder) -> ValidationReport {
    let (value, remaining) = match decoder.decode_prefix(data) {
        Ok(pair) => pair,
        Err(e) => {
            return ValidationReport {
                error_kind: Some(e.kind()),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };

    let consumed = &data[..data.len() - remaining.len()];
    let canonical = match Encoder::new()
        .max_depth(decoder.depth_limit())
        .encode(&value)
    {
        Ok(encoded) => encoded.as_ref() == consumed,
        Err(_) => false,
    };

    ValidationReport {
        valid: remaining.is_empty(),
        error_kind: (!remaining.is_empty()).then_some(ErrorKind::TrailingContent),
        error: None,
        canonical,
        keys_sorted: ValueStats::collect(&value).keys_sorted(),
        trailing_bytes: remaining.len(),
    }
}

/// Returns whether the input is valid
pub fn execute(input: &str, json: bool) -> Result<bool> {
    info!("Validating file: {}", input);

    let data = read_input(input)?;
    let report = validate_bytes(&data, Decoder::new());

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize validation report")?;
        println!("{}", rendered);
        return Ok(report.valid);
    }

    println!("\n=== Validation Results ===");

    if let Some(error) = &report.error {
        warn!("Decode failed: {}", error);
        println!("{} Malformed input: {}", "✗".red(), error);
        return Ok(false);
    }

    if report.trailing_bytes > 0 {
        println!(
            "{} {} trailing bytes after the first value",
            "✗".red(),
            report.trailing_bytes
        );
    } else {
        println!("{} Single well-formed value", "✓".green());
    }

    if report.canonical {
        println!("{} Canonical encoding", "✓".green());
    } else {
        println!("{} Re-encoding differs from input", "!".yellow());
    }

    if report.keys_sorted {
        println!("{} Dictionary keys sorted", "✓".green());
    } else {
        println!("{} Dictionary keys not in raw-byte order", "!".yellow());
    }

    println!("\n=== Summary ===");
    if report.valid && report.canonical {
        println!("{} File is valid and canonical", "✓".green());
    } else if report.valid {
        println!("{} File is valid but not canonical", "!".yellow());
    } else {
        println!("{} File has trailing content", "✗".red());
    }

    Ok(report.valid)
}
