//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Extension used for XIP artifacts.
pub const XIP_EXTENSION: &str = "xip";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Default artifact path: `name.ext` becomes `name.ext.xip`.
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(XIP_EXTENSION);
    PathBuf::from(name)
}

/// Default output path: strips `.xip`, otherwise appends `.out`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == XIP_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

/// Fail if `path` exists and overwriting was not requested.
pub fn check_overwrite(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    Ok(())
}

/// Output size as a percentage of input size.
pub fn percent(output: u64, input: u64) -> f64 {
    if input == 0 {
        100.0
    } else {
        output as f64 / input as f64 * 100.0
    }
}
