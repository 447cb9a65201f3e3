//! Compress command implementation.

use crate::utils::{check_overwrite, compressed_path, create_progress_bar, percent};
use oxixip::{AllocationPolicy, XipConfig, compress_many};
use std::fs;
use std::path::PathBuf;
use std::thread;

/// Options for the compress command.
pub struct CompressOptions {
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub seed: Option<u64>,
    pub force: bool,
}

impl CompressOptions {
    fn config(&self) -> XipConfig {
        let policy = match self.seed {
            Some(seed) => AllocationPolicy::Random { seed },
            None => AllocationPolicy::Ascending,
        };
        XipConfig::new(policy).with_terminal_pass(!self.compact)
    }
}

pub fn cmd_compress(
    files: &[PathBuf],
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if options.output.is_some() && files.len() > 1 {
        return Err("--output can only be used with a single input file".into());
    }

    let targets: Vec<PathBuf> = match &options.output {
        Some(output) => vec![output.clone()],
        None => files.iter().map(|f| compressed_path(f)).collect(),
    };
    for target in &targets {
        check_overwrite(target, options.force)?;
    }

    let config = options.config();
    // One file per worker per batch, so the bar advances while work remains.
    let batch = thread::available_parallelism().map_or(1, |n| n.get());

    tracing::info!(files = files.len(), batch, "compressing");
    let pb = create_progress_bar(files.len() as u64, files.len() > 1);

    for (chunk, chunk_targets) in files.chunks(batch).zip(targets.chunks(batch)) {
        let inputs = chunk
            .iter()
            .map(fs::read)
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&[u8]> = inputs.iter().map(|data| data.as_slice()).collect();
        let artifacts = compress_many(&refs, config);

        for ((file, target), (input, artifact)) in chunk
            .iter()
            .zip(chunk_targets)
            .zip(inputs.iter().zip(&artifacts))
        {
            pb.set_message(file.display().to_string());
            fs::write(target, artifact)?;
            pb.inc(1);

            pb.suspend(|| {
                println!(
                    "{} -> {} ({} -> {} bytes, {:.1}%)",
                    file.display(),
                    target.display(),
                    input.len(),
                    artifact.len(),
                    percent(artifact.len() as u64, input.len() as u64)
                );
            });
        }
    }
    pb.finish_and_clear();

    Ok(())
}
