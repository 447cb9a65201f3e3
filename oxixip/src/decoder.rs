//! XIP decoder (decompression).
//!
//! The artifact is `[entry_count][payload][trailer]`. The trailer is parsed
//! into a [`CodeTable`] first, then every payload octet is expanded through
//! the table until only literals remain.

use crate::error::{Result, XipError};
use crate::table::{CodeTable, RECORD_SIZE};
use tracing::debug;

/// Output size limit for callers that decode untrusted artifacts (1 GiB).
pub const DEFAULT_OUTPUT_LIMIT: usize = 1 << 30;

/// Parsed artifact layout, without the expanded output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    /// Number of code table entries declared in the header.
    pub entry_count: usize,
    /// Size of the payload in bytes.
    pub payload_len: usize,
    /// The code table read from the trailer.
    pub table: CodeTable,
    /// Exact size of the decoded output (saturated at `u64::MAX`).
    pub decoded_len: u64,
}

/// Split an artifact into its code table and payload.
fn split_artifact(artifact: &[u8]) -> Result<(CodeTable, &[u8])> {
    let Some(&count) = artifact.first() else {
        return Err(XipError::TruncatedArtifact {
            entry_count: 0,
            available: 0,
        });
    };

    let entry_count = count as usize;
    let trailer_len = entry_count * RECORD_SIZE;
    if artifact.len() < 1 + trailer_len {
        return Err(XipError::TruncatedArtifact {
            entry_count,
            available: artifact.len(),
        });
    }

    let trailer_start = artifact.len() - trailer_len;
    let table = CodeTable::parse(&artifact[trailer_start..])?;
    Ok((table, &artifact[1..trailer_start]))
}

fn decoded_len(lengths: &[u64; 256], payload: &[u8]) -> u64 {
    payload
        .iter()
        .fold(0u64, |total, &byte| total.saturating_add(lengths[byte as usize]))
}

/// Parse an artifact's header and trailer without expanding the payload.
pub fn inspect(artifact: &[u8]) -> Result<ArtifactInfo> {
    let (table, payload) = split_artifact(artifact)?;
    let decoded_len = decoded_len(&table.expansion_lengths(), payload);

    Ok(ArtifactInfo {
        entry_count: table.len(),
        payload_len: payload.len(),
        table,
        decoded_len,
    })
}

/// XIP decoder for decompression.
#[derive(Debug, Clone, Copy, Default)]
pub struct XipDecoder {
    /// Maximum output size, if any.
    limit: Option<usize>,
}

impl XipDecoder {
    /// Create a decoder without an output size limit.
    pub fn new() -> Self {
        Self { limit: None }
    }

    /// Create a decoder that rejects artifacts decoding to more than
    /// `max_output` bytes.
    ///
    /// Each table level can double the expansion of a code, so a small
    /// artifact may describe an enormous output. The size is computed from
    /// the table before anything is expanded.
    pub fn with_limit(max_output: usize) -> Self {
        Self {
            limit: Some(max_output),
        }
    }

    /// Get the output size limit.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Decode a XIP artifact.
    ///
    /// # Errors
    ///
    /// - [`XipError::TruncatedArtifact`] if the artifact cannot hold its trailer
    /// - [`XipError::DuplicateCode`] / [`XipError::ForwardReference`] for a
    ///   malformed trailer
    /// - [`XipError::OutputLimitExceeded`] if a limit is set and exceeded
    /// - [`XipError::OutputAllocation`] if the output cannot be reserved
    pub fn decode(&self, artifact: &[u8]) -> Result<Vec<u8>> {
        let (table, payload) = split_artifact(artifact)?;
        let lengths = table.expansion_lengths();
        let size = decoded_len(&lengths, payload);

        if let Some(limit) = self.limit {
            if size > limit as u64 {
                return Err(XipError::OutputLimitExceeded { size, limit });
            }
        }

        debug!(
            artifact_len = artifact.len(),
            entries = table.len(),
            decoded_len = size,
            "xip decode"
        );

        // The whole output is reserved before expanding, so an oversized
        // artifact fails here instead of aborting mid-expansion.
        let mut output = Vec::new();
        usize::try_from(size)
            .ok()
            .and_then(|capacity| output.try_reserve_exact(capacity).ok())
            .ok_or(XipError::OutputAllocation { size })?;
        let mut stack = Vec::with_capacity(table.len() + 1);

        for &byte in payload {
            expand(&table, byte, &mut stack, &mut output);
        }

        Ok(output)
    }
}

/// Append the expansion of `byte` to `output`.
///
/// Uses an explicit stack instead of recursion; the stack never holds more
/// than `table.len() + 1` octets because every code's components precede it.
fn expand(table: &CodeTable, byte: u8, stack: &mut Vec<u8>, output: &mut Vec<u8>) {
    stack.push(byte);

    while let Some(top) = stack.pop() {
        match table.get(top) {
            Some((c0, c1)) => {
                // Second component goes first so the first one is expanded first.
                stack.push(c1);
                stack.push(c0);
            }
            None => output.push(top),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::XipEncoder;

    #[test]
    fn test_decode_worked_example() {
        let artifact = [0x02, 0x01, 0x00, 0x41, 0x41, 0x01, 0x00, 0x41];
        let decoded = XipDecoder::new().decode(&artifact).unwrap();
        assert_eq!(decoded, [0x41, 0x41, 0x41]);
    }

    #[test]
    fn test_decode_empty_table() {
        assert_eq!(XipDecoder::new().decode(&[0x00]).unwrap(), b"");
        assert_eq!(XipDecoder::new().decode(b"\x00hello").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_truncated() {
        let err = XipDecoder::new().decode(b"").unwrap_err();
        assert!(matches!(
            err,
            XipError::TruncatedArtifact {
                entry_count: 0,
                available: 0
            }
        ));

        // Two entries need at least 7 bytes.
        let err = XipDecoder::new().decode(&[0x02, 0x00, 0x41, 0x41]).unwrap_err();
        assert!(matches!(
            err,
            XipError::TruncatedArtifact {
                entry_count: 2,
                available: 4
            }
        ));
    }

    #[test]
    fn test_decode_exact_trailer_without_payload() {
        // Header plus one record and nothing else decodes to empty output.
        let decoded = XipDecoder::new().decode(&[0x01, 0x00, 0x41, 0x41]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_cyclic_trailer() {
        let artifact = [0x02, 0x00, 0x00, 0x01, 0x41, 0x01, 0x00, 0x41];
        let err = XipDecoder::new().decode(&artifact).unwrap_err();
        assert!(matches!(err, XipError::ForwardReference { .. }));
    }

    #[test]
    fn test_output_limit() {
        let input = vec![b'X'; 4096];
        let artifact = XipEncoder::default().encode(&input);

        let err = XipDecoder::with_limit(4095).decode(&artifact).unwrap_err();
        assert!(matches!(
            err,
            XipError::OutputLimitExceeded {
                size: 4096,
                limit: 4095
            }
        ));

        let decoded = XipDecoder::with_limit(4096).decode(&artifact).unwrap();
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_output_limit_on_expansion_bomb() {
        // 64 nested doublings describe 2^64 bytes in a ~200 byte artifact.
        let mut artifact = vec![64u8, 63];
        artifact.extend_from_slice(&[0, 0xFF, 0xFF]);
        for code in 1..64u8 {
            artifact.extend_from_slice(&[code, code - 1, code - 1]);
        }

        let err = XipDecoder::with_limit(1 << 20).decode(&artifact).unwrap_err();
        assert!(matches!(err, XipError::OutputLimitExceeded { size: u64::MAX, .. }));
    }

    #[test]
    fn test_unlimited_decode_rejects_expansion_bomb() {
        let mut artifact = vec![64u8, 63];
        artifact.extend_from_slice(&[0, 0xFF, 0xFF]);
        for code in 1..64u8 {
            artifact.extend_from_slice(&[code, code - 1, code - 1]);
        }

        let err = XipDecoder::new().decode(&artifact).unwrap_err();
        assert!(matches!(err, XipError::OutputAllocation { size: u64::MAX }));
    }

    #[test]
    fn test_default_limit_rejects_deep_table() {
        // 40 doublings: 2^40 bytes from a 122 byte artifact.
        let mut artifact = vec![40u8, 39];
        artifact.extend_from_slice(&[0, 0xFF, 0xFF]);
        for code in 1..40u8 {
            artifact.extend_from_slice(&[code, code - 1, code - 1]);
        }
        assert_eq!(artifact.len(), 122);
        assert_eq!(inspect(&artifact).unwrap().decoded_len, 1 << 40);

        let err = XipDecoder::with_limit(DEFAULT_OUTPUT_LIMIT)
            .decode(&artifact)
            .unwrap_err();
        assert!(matches!(
            err,
            XipError::OutputLimitExceeded {
                size: 1_099_511_627_776,
                limit: DEFAULT_OUTPUT_LIMIT
            }
        ));
    }

    #[test]
    fn test_inspect() {
        let info = inspect(&[0x02, 0x01, 0x00, 0x41, 0x41, 0x01, 0x00, 0x41]).unwrap();
        assert_eq!(info.entry_count, 2);
        assert_eq!(info.payload_len, 1);
        assert_eq!(info.decoded_len, 3);
        assert_eq!(info.table.get(0x01), Some((0x00, 0x41)));
    }
}
