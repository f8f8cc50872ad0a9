use crate::read_input;
use anyhow::Result;
use bencodec_core::inspect::ValueStats;
use bencodec_core::stream::decode_stream_with_stats;
use bencodec_core::Decoder;
use colored::*;
use tracing::{info, warn};

pub fn execute(input: &str, max_depth: usize) -> Result<()> {
    info!("Inspecting file: {}", input);

    let data = read_input(input)?;
    info!("File size: {} bytes", data.len());

    let (values, stats) = decode_stream_with_stats(&data, Decoder::new().max_depth(max_depth));

    println!("\n=== Stream ===");
    println!("Bytes total:       {} bytes", stats.bytes_total);
    println!("Values decoded:    {}", stats.values_decoded);
    println!("Bytes decoded:     {} bytes", stats.bytes_decoded);
    println!("Coverage:          {:.2}%", stats.coverage());

    if let Some(err) = &stats.error {
        warn!("Decoding stopped: {}", err);
        println!("Stopped by:        {}", err.to_string().red());
    }

    for located in &values {
        let shape = ValueStats::collect(&located.value);

        println!(
            "\n=== {} @ offset {} ({} bytes) ===",
            located.value.type_name(),
            located.offset,
            located.size
        );
        println!("Integers:          {}", shape.integers);
        println!("Byte strings:      {}", shape.byte_strings);
        println!("Lists:             {}", shape.lists);
        println!("Dictionaries:      {}", shape.dicts);
        println!("Keys:              {}", shape.keys);
        println!("Max depth:         {}", shape.max_depth);
        println!("Payload bytes:     {}", shape.payload_bytes);
        if shape.keys_sorted() {
            println!("Key order:         sorted");
        } else {
            println!(
                "Key order:         {}",
                format!("{} unsorted dictionaries", shape.unsorted_dicts).yellow()
            );
        }
    }
    println!();

    Ok(())
}
