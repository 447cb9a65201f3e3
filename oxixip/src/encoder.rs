//! XIP encoder (compression).
//!
//! Greedy pair substitution: repeatedly replace the most frequent adjacent
//! pair of the working buffer with a fresh code until no pair repeats or no
//! code is left, then emit `[entry_count][payload][trailer]`.

use crate::allocator::CodeAllocator;
use crate::config::XipConfig;
use crate::frequency::{Pair, PairFrequency};
use crate::table::{CodeTable, MAX_ENTRIES};
use tracing::{debug, trace};

/// Why the substitution loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The working buffer held fewer than two bytes, either from the start
    /// or after a substitution shrank it to a single code.
    NoPairs,
    /// The most frequent pair occurred only once.
    SingleFrequency,
    /// Every admissible code value was in use.
    TableExhausted,
}

/// Statistics of one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Size of the input in bytes.
    pub input_len: usize,
    /// Size of the payload (the substituted buffer) in bytes.
    pub payload_len: usize,
    /// Number of code table entries.
    pub entries: usize,
    /// Why the loop stopped.
    pub stop: StopReason,
}

impl EncodeSummary {
    /// Total artifact size: header byte, payload and trailer.
    pub fn artifact_len(&self) -> usize {
        1 + self.payload_len + 3 * self.entries
    }

    /// Artifact size relative to the input size (1.0 when the input is empty).
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 1.0;
        }
        self.artifact_len() as f64 / self.input_len as f64
    }
}

/// XIP encoder for compression.
///
/// The encoder holds configuration only; every call owns its own buffer,
/// table and allocator, so one encoder can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct XipEncoder {
    config: XipConfig,
}

impl XipEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: XipConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &XipConfig {
        &self.config
    }

    /// Encode data into a XIP artifact.
    pub fn encode(&self, input: &[u8]) -> Vec<u8> {
        self.encode_with_summary(input).0
    }

    /// Encode data and report what the substitution loop did.
    ///
    /// # Algorithm
    ///
    /// 1. Count all overlapping pairs of the working buffer
    /// 2. Allocate a code; stop if none is left
    /// 3. Pick the most frequent pair (ties: latest first-seen pair)
    /// 4. Record `code -> pair` in the table
    /// 5. Replace non-overlapping occurrences, left to right, with the code
    /// 6. Repeat while the frequency picked in step 3 was not 1
    ///
    /// With [`XipConfig::terminal_pass`] set, the iteration whose pair occurs
    /// once still performs steps 4-5 before the loop ends.
    pub fn encode_with_summary(&self, input: &[u8]) -> (Vec<u8>, EncodeSummary) {
        let mut buffer = input.to_vec();
        let mut table = CodeTable::new();
        let mut allocator = CodeAllocator::new(input, self.config.policy);
        let mut freq = PairFrequency::new();

        debug!(
            input_len = input.len(),
            max_codes = allocator.max_codes(),
            "xip encode start"
        );

        let stop = loop {
            freq.analyze(&buffer);
            let Some((pair, frequency)) = freq.most_frequent() else {
                break StopReason::NoPairs;
            };

            if frequency == 1 && !self.config.terminal_pass {
                break StopReason::SingleFrequency;
            }

            let code = match allocator.next_code() {
                Ok(code) => code,
                Err(err) => {
                    debug!(%err, entries = table.len(), "stopping early");
                    break StopReason::TableExhausted;
                }
            };

            table.insert(code, pair);
            substitute(&mut buffer, pair, code);

            trace!(
                code,
                first = pair.0,
                second = pair.1,
                frequency,
                buffer_len = buffer.len(),
                "substituted pair"
            );

            if frequency == 1 {
                break StopReason::SingleFrequency;
            }
        };

        let mut output = Vec::with_capacity(1 + buffer.len() + table.serialized_len());
        // The allocator caps the table at 255 entries for any non-empty input.
        debug_assert!(table.len() <= MAX_ENTRIES);
        output.push(table.len() as u8);
        output.extend_from_slice(&buffer);
        table.write_to(&mut output);

        let summary = EncodeSummary {
            input_len: input.len(),
            payload_len: buffer.len(),
            entries: table.len(),
            stop,
        };

        debug!(
            artifact_len = output.len(),
            entries = summary.entries,
            stop = ?summary.stop,
            "xip encode done"
        );

        (output, summary)
    }
}

/// Replace every non-overlapping occurrence of `pair`, scanning left to
/// right, with `code`. Works in place; the buffer only shrinks.
fn substitute(buffer: &mut Vec<u8>, pair: Pair, code: u8) {
    let len = buffer.len();
    let mut read = 0;
    let mut write = 0;

    while read < len {
        if read + 1 < len && buffer[read] == pair.0 && buffer[read + 1] == pair.1 {
            buffer[write] = code;
            read += 2;
        } else {
            buffer[write] = buffer[read];
            read += 1;
        }
        write += 1;
    }

    buffer.truncate(write);
}
