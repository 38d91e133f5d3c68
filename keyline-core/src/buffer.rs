//! Bounded message buffer
//!
//! The buffer has `SLOTS` slots. Message text may use `SLOTS - 1` of them;
//! the last slot is reserved so a command key pressed on a full buffer can
//! still be accepted as a trailing marker and then acted on.

use heapless::Vec;

/// Errors from buffer edits. A failed edit leaves the buffer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// No slot left for this kind of character
    Full,
    /// Fewer characters than requested for removal
    Underflow,
    /// Character is not printable ASCII
    InvalidChar,
}

/// Message text plus at most one trailing command marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBuffer<const SLOTS: usize> {
    slots: Vec<u8, SLOTS>,
}

impl<const SLOTS: usize> Default for MessageBuffer<SLOTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOTS: usize> MessageBuffer<SLOTS> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Characters of message text the buffer can hold
    pub const fn payload_capacity(&self) -> usize {
        SLOTS.saturating_sub(1)
    }

    /// Occupied slots, including a pending marker
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// No more message text can be appended
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.payload_capacity()
    }

    /// Most recently accepted character
    pub fn last(&self) -> Option<u8> {
        self.slots.last().copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.slots
    }

    /// Buffer contents as text
    pub fn as_str(&self) -> &str {
        // Only printable ASCII is ever stored
        core::str::from_utf8(&self.slots).unwrap_or("")
    }

    /// Append a message character
    pub fn push_char(&mut self, c: u8) -> Result<(), BufferError> {
        if !is_printable(c) {
            return Err(BufferError::InvalidChar);
        }
        if self.is_full() {
            return Err(BufferError::Full);
        }
        self.slots.push(c).map_err(|_| BufferError::Full)
    }

    /// Append a command marker, which may use the reserved slot
    pub fn push_marker(&mut self, c: u8) -> Result<(), BufferError> {
        if !is_printable(c) {
            return Err(BufferError::InvalidChar);
        }
        self.slots.push(c).map_err(|_| BufferError::Full)
    }

    /// Remove the last `n` slots, or nothing if fewer are occupied
    pub fn remove_last(&mut self, n: usize) -> Result<(), BufferError> {
        if n > self.slots.len() {
            return Err(BufferError::Underflow);
        }
        self.slots.truncate(self.slots.len() - n);
        Ok(())
    }

    /// Drop the trailing character if it is `marker`
    pub fn strip_marker(&mut self, marker: u8) -> Option<u8> {
        if self.last() == Some(marker) {
            self.slots.pop()
        } else {
            None
        }
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Replace the whole contents; text past the payload capacity is cut off
    ///
    /// Returns the number of characters kept.
    pub fn replace_with(&mut self, text: &[u8]) -> usize {
        self.slots.clear();
        for &c in text {
            if self.push_char(c).is_err() {
                break;
            }
        }
        self.slots.len()
    }
}

fn is_printable(c: u8) -> bool {
    c.is_ascii_graphic() || c == b' '
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Buf = MessageBuffer<5>;

    #[test]
    fn test_push_until_full() {
        let mut buf = Buf::new();
        for c in *b"1234" {
            assert_eq!(buf.push_char(c), Ok(()));
        }
        assert!(buf.is_full());
        assert_eq!(buf.push_char(b'5'), Err(BufferError::Full));
        assert_eq!(buf.as_bytes(), b"1234");
    }

    #[test]
    fn test_marker_uses_reserved_slot() {
        let mut buf = Buf::new();
        buf.replace_with(b"1234");
        assert_eq!(buf.push_marker(b'#'), Ok(()));
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.push_marker(b'#'), Err(BufferError::Full));
        assert_eq!(buf.strip_marker(b'#'), Some(b'#'));
        assert_eq!(buf.as_str(), "1234");
    }

    #[test]
    fn test_strip_marker_only_matches() {
        let mut buf = Buf::new();
        buf.replace_with(b"12");
        assert_eq!(buf.strip_marker(b'#'), None);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_remove_last() {
        let mut buf = Buf::new();
        buf.replace_with(b"123");
        assert_eq!(buf.remove_last(2), Ok(()));
        assert_eq!(buf.as_str(), "1");
        assert_eq!(buf.remove_last(2), Err(BufferError::Underflow));
        assert_eq!(buf.as_str(), "1");
        assert_eq!(buf.remove_last(0), Ok(()));
    }

    #[test]
    fn test_replace_truncates() {
        let mut buf = Buf::new();
        assert_eq!(buf.replace_with(b"012345"), 4);
        assert_eq!(buf.as_str(), "0123");
    }

    #[test]
    fn test_rejects_control_bytes() {
        let mut buf = Buf::new();
        assert_eq!(buf.push_char(0), Err(BufferError::InvalidChar));
        assert_eq!(buf.push_marker(b'\n'), Err(BufferError::InvalidChar));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut buf = Buf::new();
        buf.replace_with(b"99");
        buf.push_marker(b'D').unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.last(), None);
    }

    proptest! {
        #[test]
        fn prop_append_monotonic(text in "[0-9BC]{0,16}") {
            let mut buf = MessageBuffer::<17>::new();
            for (i, c) in text.bytes().enumerate() {
                prop_assert_eq!(buf.push_char(c), Ok(()));
                prop_assert_eq!(buf.len(), i + 1);
            }
            prop_assert_eq!(buf.as_str(), text.as_str());
        }

        #[test]
        fn prop_remove_last_exact(len in 0usize..=16, n in 0usize..=20) {
            let mut buf = MessageBuffer::<17>::new();
            for _ in 0..len {
                buf.push_char(b'7').unwrap();
            }
            let result = buf.remove_last(n);
            if n <= len {
                prop_assert_eq!(result, Ok(()));
                prop_assert_eq!(buf.len(), len - n);
            } else {
                prop_assert_eq!(result, Err(BufferError::Underflow));
                prop_assert_eq!(buf.len(), len);
            }
        }
    }
}
