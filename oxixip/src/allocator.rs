//! Free code allocation.
//!
//! A code is an octet that appears nowhere in the original input and has not
//! been handed out before. Exclusions are fixed when the allocator is created
//! from the original input, not from the shrinking working buffer, so a code
//! can never be confused with a literal byte on decode.

use crate::config::AllocationPolicy;
use crate::error::{Result, XipError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Allocator of unused octet values.
#[derive(Debug)]
pub struct CodeAllocator {
    /// Octets present in the original input.
    literal: [bool; 256],
    /// Octets already handed out as codes.
    used: [bool; 256],
    /// Number of codes handed out.
    allocated: usize,
    /// Number of admissible codes for this input.
    max_codes: usize,
    /// Generator for [`AllocationPolicy::Random`].
    rng: Option<StdRng>,
}

impl CodeAllocator {
    /// Create an allocator excluding every octet of `original`.
    pub fn new(original: &[u8], policy: AllocationPolicy) -> Self {
        let mut literal = [false; 256];
        for &byte in original {
            literal[byte as usize] = true;
        }
        let distinct = literal.iter().filter(|&&present| present).count();

        let rng = match policy {
            AllocationPolicy::Ascending => None,
            AllocationPolicy::Random { seed } => Some(StdRng::seed_from_u64(seed)),
        };

        Self {
            literal,
            used: [false; 256],
            allocated: 0,
            max_codes: 256 - distinct,
            rng,
        }
    }

    /// Hand out the next free code.
    ///
    /// Fails with [`XipError::TableExhausted`] once `256 - distinct input
    /// octets` codes have been handed out.
    pub fn next_code(&mut self) -> Result<u8> {
        if self.is_exhausted() {
            return Err(XipError::TableExhausted {
                max_codes: self.max_codes,
            });
        }

        let code = match self.rng.as_mut() {
            None => (0..=255u8)
                .find(|&c| !self.literal[c as usize] && !self.used[c as usize])
                .ok_or(XipError::TableExhausted {
                    max_codes: self.max_codes,
                })?,
            Some(rng) => loop {
                // At least one admissible value remains, so this terminates.
                let candidate: u8 = rng.r#gen();
                if !self.literal[candidate as usize] && !self.used[candidate as usize] {
                    break candidate;
                }
            },
        };

        self.used[code as usize] = true;
        self.allocated += 1;
        Ok(code)
    }

    /// Check if `byte` occurs in the original input.
    pub fn is_literal(&self, byte: u8) -> bool {
        self.literal[byte as usize]
    }

    /// Check if no code can be handed out anymore.
    pub fn is_exhausted(&self) -> bool {
        self.allocated >= self.max_codes
    }

    /// Number of codes handed out so far.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Number of codes available for this input in total.
    pub fn max_codes(&self) -> usize {
        self.max_codes
    }
}
