//! XIP-specific error types.

use thiserror::Error;

/// XIP compression/decompression errors.
#[derive(Debug, Error)]
pub enum XipError {
    /// Artifact is too short to hold the header byte and its trailer.
    #[error("Truncated artifact: {entry_count} table entries declared, only {available} bytes available")]
    TruncatedArtifact {
        /// Entry count read from the header (0 if the artifact is empty).
        entry_count: usize,
        /// Number of bytes actually available.
        available: usize,
    },

    /// A trailer record redefines a code already defined earlier.
    #[error("Duplicate code {code:#04x} in trailer record {index}")]
    DuplicateCode {
        /// The repeated code.
        code: u8,
        /// Index of the offending trailer record.
        index: usize,
    },

    /// A trailer record refers to a code that is not defined before it.
    #[error("Code {code:#04x} in trailer record {index} refers to code {component:#04x} defined at or after it")]
    ForwardReference {
        /// The code being defined.
        code: u8,
        /// The component that refers forward (or to itself).
        component: u8,
        /// Index of the offending trailer record.
        index: usize,
    },

    /// Decoded output would exceed the configured limit.
    #[error("Decoded size {size} exceeds limit of {limit} bytes")]
    OutputLimitExceeded {
        /// Size the artifact expands to (saturated at `u64::MAX`).
        size: u64,
        /// Maximum allowed output size.
        limit: usize,
    },

    /// Memory for the decoded output could not be reserved.
    #[error("Cannot allocate {size} bytes for decoded output")]
    OutputAllocation {
        /// Size the artifact expands to (saturated at `u64::MAX`).
        size: u64,
    },

    /// No admissible code value remains.
    #[error("Code table exhausted (max {max_codes} codes)")]
    TableExhausted {
        /// Number of codes available for this input.
        max_codes: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for XIP operations.
pub type Result<T> = std::result::Result<T, XipError>;
