//! # OxiXIP: Pure Rust XIP Compression
//!
//! This crate provides compression and decompression of the XIP format, a
//! content-agnostic greedy pair-substitution scheme (a byte-pair encoding
//! variant) with a self-describing code table appended to the output.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Compatible**: Reproduces existing XIP artifacts byte for byte
//! - **Stateless**: Every call owns its working state; encoders and decoders
//!   can be shared across threads
//! - **Bounded decoding**: Output size computed and checked before expansion
//! - **Parallel batches**: `compress_many` with the `parallel` feature
//!
//! ## Format
//!
//! ```text
//! ┌─────────────┬─────────────────┬──────────────────────────────────┐
//! │ entry_count │ payload         │ trailer                          │
//! │ 1 byte      │ variable        │ entry_count × [code][c0][c1]     │
//! └─────────────┴─────────────────┴──────────────────────────────────┘
//! ```
//!
//! Each code is an octet absent from the original input that stands for the
//! pair `(c0, c1)`; components are literals or earlier codes. At most 255
//! codes fit, and there is no entropy coding stage.
//!
//! ## Example
//!
//! ```rust
//! use oxixip::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress(original);
//!
//! // Decompress
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Worked Example
//!
//! ```rust
//! use oxixip::compress;
//!
//! // AA -> 0x00, then (0x00, A) -> 0x01; the payload is the single code 0x01.
//! let artifact = compress(&[0x41, 0x41, 0x41]);
//! assert_eq!(artifact, [0x02, 0x01, 0x00, 0x41, 0x41, 0x01, 0x00, 0x41]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod allocator;
mod config;
mod decoder;
mod encoder;
mod error;
mod frequency;
mod io;
mod table;

pub use allocator::CodeAllocator;
pub use config::{AllocationPolicy, XipConfig};
pub use decoder::{ArtifactInfo, DEFAULT_OUTPUT_LIMIT, XipDecoder, inspect};
pub use encoder::{EncodeSummary, StopReason, XipEncoder};
pub use error::{Result, XipError};
pub use frequency::{Pair, PairFrequency};
pub use io::{XipReader, XipWriter};
pub use table::{CodeTable, MAX_ENTRIES, RECORD_SIZE};

/// Compress data with the compatible configuration.
///
/// Compression never fails: running out of code values just ends the
/// substitution loop early.
///
/// # Example
///
/// ```rust
/// use oxixip::compress;
///
/// let data = vec![b'X'; 1000];
/// let compressed = compress(&data);
/// assert!(compressed.len() < 100);
/// ```
pub fn compress(data: &[u8]) -> Vec<u8> {
    compress_with(data, XipConfig::COMPATIBLE)
}

/// Compress data with the given configuration.
///
/// # Example
///
/// ```rust
/// use oxixip::{compress_with, decompress, XipConfig};
///
/// let data = b"abcabcabcabc";
/// let compressed = compress_with(data, XipConfig::COMPACT);
/// assert_eq!(decompress(&compressed).unwrap(), data);
/// ```
pub fn compress_with(data: &[u8], config: XipConfig) -> Vec<u8> {
    XipEncoder::new(config).encode(data)
}

/// Decompress a XIP artifact.
///
/// # Example
///
/// ```rust
/// use oxixip::decompress;
///
/// let decompressed = decompress(&[0x01, 0x00, 0x00, b'h', b'i']).unwrap();
/// assert_eq!(decompressed, b"hi");
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    XipDecoder::new().decode(data)
}

/// Decompress a XIP artifact, refusing outputs larger than `max_output` bytes.
pub fn decompress_with_limit(data: &[u8], max_output: usize) -> Result<Vec<u8>> {
    XipDecoder::with_limit(max_output).decode(data)
}

/// Compress several independent inputs in parallel.
///
/// Outputs are returned in input order and are identical to calling
/// [`compress_with`] on each input.
#[cfg(feature = "parallel")]
pub fn compress_many(inputs: &[&[u8]], config: XipConfig) -> Vec<Vec<u8>> {
    use rayon::prelude::*;

    let encoder = XipEncoder::new(config);
    inputs.par_iter().map(|input| encoder.encode(input)).collect()
}
