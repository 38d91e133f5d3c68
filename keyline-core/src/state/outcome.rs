//! Result of handling one key press

/// What a key press did
///
/// Nothing here is an error surfaced to the user; the display is the only
/// feedback. Outcomes exist for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Character appended and echoed
    Appended(u8),
    /// Key not accepted: buffer full
    Dropped(u8),
    /// Last character removed
    Erased,
    /// Backspace on an empty message
    BackspaceIgnored,
    /// Buffer and display emptied
    Cleared,
    /// Demo message loaded
    DemoInserted,
    /// Message of `len` characters transmitted, buffer reset
    Sent { len: usize },
}

impl Outcome {
    /// The press was thrown away without effect
    pub fn is_noop(&self) -> bool {
        matches!(self, Outcome::Dropped(_) | Outcome::BackspaceIgnored)
    }
}
