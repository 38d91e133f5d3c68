//! Single-slot key mailbox
//!
//! The scanner (timer context) publishes, the editor (main loop) takes.
//! There is no queue: a press published before the previous one was taken
//! replaces it, and the earlier press is lost. At human typing speed the
//! editor drains the slot long before the next scan.
//!
//! The slot is one atomic byte holding the key's row-major index, so a
//! publish is never observed half-written.

use portable_atomic::{AtomicU8, Ordering};

use crate::keypad::KeyCode;

const EMPTY: u8 = 0xFF;

/// Last-key-wins mailbox between the scanner and the editor
#[derive(Debug)]
pub struct KeyMailbox {
    slot: AtomicU8,
}

impl Default for KeyMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMailbox {
    /// Create an empty mailbox (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(EMPTY),
        }
    }

    /// Publish a key press
    ///
    /// Returns the unconsumed press that was overwritten, if any.
    pub fn publish(&self, key: KeyCode) -> Option<KeyCode> {
        decode(self.slot.swap(key.index(), Ordering::AcqRel))
    }

    /// Take the pending press, leaving the mailbox empty
    pub fn take(&self) -> Option<KeyCode> {
        decode(self.slot.swap(EMPTY, Ordering::AcqRel))
    }

    /// Look at the pending press without consuming it
    pub fn peek(&self) -> Option<KeyCode> {
        decode(self.slot.load(Ordering::Acquire))
    }

    pub fn is_pending(&self) -> bool {
        self.slot.load(Ordering::Acquire) != EMPTY
    }

    /// Discard any pending press
    pub fn clear(&self) {
        self.slot.store(EMPTY, Ordering::Release);
    }
}

fn decode(raw: u8) -> Option<KeyCode> {
    if raw == EMPTY {
        None
    } else {
        KeyCode::from_index(raw)
    }
}
