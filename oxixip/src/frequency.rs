//! Adjacent pair frequency analysis.

/// Two adjacent octets.
pub type Pair = (u8, u8);

#[inline]
fn pair_index(pair: Pair) -> usize {
    ((pair.0 as usize) << 8) | pair.1 as usize
}

#[inline]
fn index_pair(index: u16) -> Pair {
    ((index >> 8) as u8, index as u8)
}

/// Overlapping pair counts for a byte buffer.
///
/// Counts are kept in a flat 64K table; pairs are additionally remembered in
/// the order they were first seen, which is the order ties are resolved in.
#[derive(Debug, Clone)]
pub struct PairFrequency {
    /// Count per pair, indexed by `(first << 8) | second`.
    counts: Box<[u64]>,
    /// Distinct pairs in first-occurrence order.
    order: Vec<u16>,
}

impl PairFrequency {
    /// Create an empty frequency table.
    pub fn new() -> Self {
        Self {
            counts: vec![0u64; 1 << 16].into_boxed_slice(),
            order: Vec::new(),
        }
    }

    /// Count the pairs of `buffer`.
    pub fn from_buffer(buffer: &[u8]) -> Self {
        let mut freq = Self::new();
        freq.analyze(buffer);
        freq
    }

    /// Replace the current counts with those of `buffer`.
    ///
    /// Every position `i, i + 1` is counted, so `AAA` holds two `AA` pairs.
    pub fn analyze(&mut self, buffer: &[u8]) {
        self.clear();

        for window in buffer.windows(2) {
            let index = pair_index((window[0], window[1]));
            if self.counts[index] == 0 {
                self.order.push(index as u16);
            }
            self.counts[index] += 1;
        }
    }

    /// Reset all counts to zero.
    pub fn clear(&mut self) {
        for &index in &self.order {
            self.counts[index as usize] = 0;
        }
        self.order.clear();
    }

    /// Number of occurrences of `pair`.
    pub fn count(&self, pair: Pair) -> u64 {
        self.counts[pair_index(pair)]
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if no pair was counted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The pair with the highest count, and that count.
    ///
    /// Among pairs sharing the highest count, the one first seen latest in
    /// the buffer wins. Existing XIP artifacts depend on this ordering.
    pub fn most_frequent(&self) -> Option<(Pair, u64)> {
        let mut best: Option<(u16, u64)> = None;

        for &index in &self.order {
            let count = self.counts[index as usize];
            match best {
                Some((_, best_count)) if count < best_count => {}
                _ => best = Some((index, count)),
            }
        }

        best.map(|(index, count)| (index_pair(index), count))
    }

    /// Iterate over `(pair, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, u64)> + '_ {
        self.order
            .iter()
            .map(|&index| (index_pair(index), self.counts[index as usize]))
    }
}

impl Default for PairFrequency {
    fn default() -> Self {
        Self::new()
    }
}
