//! Decompress command implementation.

use crate::utils::{check_overwrite, decompressed_path};
use oxixip::XipReader;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    file: &Path,
    output: Option<PathBuf>,
    max_size: usize,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = output.unwrap_or_else(|| decompressed_path(file));
    check_overwrite(&target, force)?;

    let mut reader = XipReader::with_limit(BufReader::new(File::open(file)?), max_size);
    let data = reader.decompress()?;
    fs::write(&target, &data)?;

    println!(
        "{} -> {} ({} bytes)",
        file.display(),
        target.display(),
        data.len()
    );
    Ok(())
}
