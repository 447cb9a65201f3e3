//! Encoder configuration (allocation policy, terminal pass).

/// How the encoder picks the next free code value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationPolicy {
    /// Smallest octet that is neither a table key nor present in the input.
    #[default]
    Ascending,
    /// Uniformly random octet, redrawn until admissible.
    ///
    /// The generator is seeded, so the same seed and input always produce
    /// the same artifact.
    Random {
        /// PRNG seed.
        seed: u64,
    },
}

/// XIP encoder configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XipConfig {
    /// Code allocation policy.
    pub policy: AllocationPolicy,
    /// Whether the final iteration still substitutes a pair that occurs
    /// only once.
    ///
    /// Existing XIP artifacts always carry this extra entry; disabling it
    /// yields an artifact one trailer record (and usually one payload byte)
    /// smaller that any decoder still reads.
    pub terminal_pass: bool,
}

impl XipConfig {
    /// Configuration reproducing existing XIP artifacts.
    ///
    /// - Ascending code allocation
    /// - Terminal single-occurrence substitution kept
    pub const COMPATIBLE: Self = Self {
        policy: AllocationPolicy::Ascending,
        terminal_pass: true,
    };

    /// Configuration that stops as soon as no pair repeats.
    ///
    /// - Ascending code allocation
    /// - No terminal substitution
    pub const COMPACT: Self = Self {
        policy: AllocationPolicy::Ascending,
        terminal_pass: false,
    };

    /// Create a compatible configuration with the given allocation policy.
    pub fn new(policy: AllocationPolicy) -> Self {
        Self {
            policy,
            ..Self::COMPATIBLE
        }
    }

    /// Set whether the terminal substitution is performed.
    pub fn with_terminal_pass(mut self, terminal_pass: bool) -> Self {
        self.terminal_pass = terminal_pass;
        self
    }
}

impl Default for XipConfig {
    fn default() -> Self {
        Self::COMPATIBLE
    }
}
