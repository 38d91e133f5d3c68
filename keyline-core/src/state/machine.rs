//! Transition selection

use crate::keypad::Command;

/// Message loaded by the `A` key
pub const DEMO_SEQUENCE: &[u8] = b"012345";

/// Transition fired for one accepted key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Message text was appended; echo it
    Append(u8),
    /// Drop the marker and the character before it
    Backspace,
    /// Empty the buffer and the display
    ClearAll,
    /// Replace the buffer with `DEMO_SEQUENCE`
    InsertDemo,
    /// Strip the marker, transmit, reset
    Finalize,
}

impl Transition {
    /// Select the transition for the most recently accepted character
    pub const fn from_last(c: u8) -> Self {
        match Command::from_char(c) {
            Some(Command::Backspace) => Transition::Backspace,
            Some(Command::ClearAll) => Transition::ClearAll,
            Some(Command::InsertDemo) => Transition::InsertDemo,
            Some(Command::Finalize) => Transition::Finalize,
            None => Transition::Append(c),
        }
    }

    /// Command marker left in the buffer by this transition's key
    pub const fn marker(self) -> Option<u8> {
        match self {
            Transition::Append(_) => None,
            Transition::Backspace => Some(Command::Backspace.marker()),
            Transition::ClearAll => Some(Command::ClearAll.marker()),
            Transition::InsertDemo => Some(Command::InsertDemo.marker()),
            Transition::Finalize => Some(Command::Finalize.marker()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_appends() {
        for c in *b"0123456789BC" {
            assert_eq!(Transition::from_last(c), Transition::Append(c));
            assert_eq!(Transition::from_last(c).marker(), None);
        }
    }

    #[test]
    fn test_commands() {
        assert_eq!(Transition::from_last(b'*'), Transition::Backspace);
        assert_eq!(Transition::from_last(b'D'), Transition::ClearAll);
        assert_eq!(Transition::from_last(b'A'), Transition::InsertDemo);
        assert_eq!(Transition::from_last(b'#'), Transition::Finalize);
    }

    #[test]
    fn test_marker_matches_key() {
        for c in *b"*DA#" {
            assert_eq!(Transition::from_last(c).marker(), Some(c));
        }
    }
}
