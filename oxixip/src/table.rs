//! Code table (code -> pair mapping) and its trailer serialization.
//!
//! On the wire the table is a sequence of 3-byte records
//! `[code][component_0][component_1]` in insertion order. Every component
//! is either a literal octet or a code defined by an earlier record, so the
//! table forms a DAG whose depth is bounded by its length.

use crate::error::{Result, XipError};
use crate::frequency::Pair;

/// Size of one serialized table record.
pub const RECORD_SIZE: usize = 3;

/// Maximum number of entries (the count is stored in one byte).
pub const MAX_ENTRIES: usize = 255;

/// Ordered mapping from code octets to the pairs they stand for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    /// Entries in insertion order.
    entries: Vec<(u8, Pair)>,
    /// Pair per code, for O(1) lookup.
    slots: [Option<Pair>; 256],
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: [None; 256],
        }
    }

    /// Append an entry.
    ///
    /// The caller guarantees `code` is not yet a key and that neither
    /// component is `code`; the encoder's allocator ensures both.
    pub fn insert(&mut self, code: u8, pair: Pair) {
        debug_assert!(self.slots[code as usize].is_none(), "code reused");
        debug_assert!(pair.0 != code && pair.1 != code, "self-referencing code");
        self.slots[code as usize] = Some(pair);
        self.entries.push((code, pair));
    }

    /// Get the pair a code stands for.
    pub fn get(&self, code: u8) -> Option<Pair> {
        self.slots[code as usize]
    }

    /// Check if `code` is a key of this table.
    pub fn contains(&self, code: u8) -> bool {
        self.slots[code as usize].is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(code, pair)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Pair)> + '_ {
        self.entries.iter().copied()
    }

    /// Size of the serialized trailer in bytes.
    pub fn serialized_len(&self) -> usize {
        self.entries.len() * RECORD_SIZE
    }

    /// Append the trailer records to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.serialized_len());
        for &(code, (c0, c1)) in &self.entries {
            out.extend_from_slice(&[code, c0, c1]);
        }
    }

    /// Parse trailer records.
    ///
    /// `trailer.len()` must be a multiple of [`RECORD_SIZE`]; trailing bytes
    /// that do not form a full record are ignored. Fails on a repeated code
    /// or on a component referring to a code defined at or after its own
    /// record, which is the only way a cycle could form.
    pub fn parse(trailer: &[u8]) -> Result<Self> {
        // Record index per code, to detect forward references.
        let mut position: [Option<usize>; 256] = [None; 256];
        for (index, record) in trailer.chunks_exact(RECORD_SIZE).enumerate() {
            let code = record[0];
            if position[code as usize].is_some() {
                return Err(XipError::DuplicateCode { code, index });
            }
            position[code as usize] = Some(index);
        }

        let mut table = Self::new();
        for (index, record) in trailer.chunks_exact(RECORD_SIZE).enumerate() {
            let (code, c0, c1) = (record[0], record[1], record[2]);
            for component in [c0, c1] {
                if matches!(position[component as usize], Some(at) if at >= index) {
                    return Err(XipError::ForwardReference {
                        code,
                        component,
                        index,
                    });
                }
            }
            table.slots[code as usize] = Some((c0, c1));
            table.entries.push((code, (c0, c1)));
        }

        Ok(table)
    }

    /// Expanded length of every octet value.
    ///
    /// Literals expand to one byte; a code expands to the sum of its
    /// components. Lengths saturate at `u64::MAX`.
    pub fn expansion_lengths(&self) -> [u64; 256] {
        let mut lengths = [1u64; 256];
        // Components always precede their code, so one pass suffices.
        for &(code, (c0, c1)) in &self.entries {
            lengths[code as usize] = lengths[c0 as usize].saturating_add(lengths[c1 as usize]);
        }
        lengths
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}
