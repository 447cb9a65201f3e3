//! Info command implementation.

use crate::utils::percent;
use oxixip::{ArtifactInfo, inspect};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON serializable code table record.
#[derive(Debug, Serialize)]
struct RecordJson {
    code: u8,
    pair: [u8; 2],
}

/// JSON output for artifact information.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    size: usize,
    entries: usize,
    payload_size: usize,
    decoded_size: u64,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<Vec<RecordJson>>,
}

impl InfoJson {
    fn new(file: &Path, size: usize, info: &ArtifactInfo, with_table: bool) -> Self {
        let table = with_table.then(|| {
            info.table
                .iter()
                .map(|(code, (c0, c1))| RecordJson {
                    code,
                    pair: [c0, c1],
                })
                .collect()
        });

        Self {
            file: file.display().to_string(),
            size,
            entries: info.entry_count,
            payload_size: info.payload_len,
            decoded_size: info.decoded_len,
            ratio: percent(size as u64, info.decoded_len),
            table,
        }
    }
}

pub fn cmd_info(file: &Path, json: bool, table: bool) -> Result<(), Box<dyn std::error::Error>> {
    let artifact = fs::read(file)?;
    let info = inspect(&artifact)?;

    if json {
        let output = InfoJson::new(file, artifact.len(), &info, table);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("XIP Artifact Information");
    println!("========================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", artifact.len());
    println!("Table entries: {}", info.entry_count);
    println!("Payload size: {} bytes", info.payload_len);
    println!("Trailer size: {} bytes", info.table.serialized_len());
    println!("Decoded size: {} bytes", info.decoded_len);
    println!(
        "Compression ratio: {:.1}%",
        percent(artifact.len() as u64, info.decoded_len)
    );

    if table {
        println!();
        println!("{:>4}  {:>4} {:>4}  Expands to", "Code", "C0", "C1");
        println!("{}", "-".repeat(40));
        let lengths = info.table.expansion_lengths();
        for (code, (c0, c1)) in info.table.iter() {
            println!(
                "0x{:02x}  0x{:02x} 0x{:02x}  {} bytes",
                code, c0, c1, lengths[code as usize]
            );
        }
    }

    Ok(())
}
