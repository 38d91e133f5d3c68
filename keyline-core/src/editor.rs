//! Message editor
//!
//! Owns the message buffer and applies one key press at a time: the key is
//! accepted into the buffer, the transition for the last accepted character
//! fires, and the display is updated to match. Finalizing hands the message
//! to the transmitter synchronously before resetting.
//!
//! Display and transmitter failures are not reported upward; there is no
//! channel to show them on. They are counted so the firmware can log them.

use crate::buffer::MessageBuffer;
use crate::keypad::{Key, KeyCode};
use crate::mailbox::KeyMailbox;
use crate::state::{Outcome, Transition, DEMO_SEQUENCE};
use crate::traits::{DisplayDriver, DisplayError, Transmitter};

/// Display line used for status text
pub const STATUS_LINE: u8 = 1;

/// Status text shown while a message is on the wire
pub const SENDING_TEXT: &str = "Sending";

/// Keypad message editor
pub struct Editor<D, T, const SLOTS: usize> {
    buffer: MessageBuffer<SLOTS>,
    display: D,
    transmitter: T,
    display_faults: u32,
    transmit_faults: u32,
}

impl<D, T, const SLOTS: usize> Editor<D, T, SLOTS>
where
    D: DisplayDriver,
    T: Transmitter,
{
    /// Create an editor with an empty message
    pub fn new(display: D, transmitter: T) -> Self {
        Self {
            buffer: MessageBuffer::new(),
            display,
            transmitter,
            display_faults: 0,
            transmit_faults: 0,
        }
    }

    /// Handle the pending press, if there is one
    pub fn poll(&mut self, mailbox: &KeyMailbox) -> Option<Outcome> {
        mailbox.take().map(|key| self.handle_key(key))
    }

    /// Handle a press at a matrix position
    pub fn handle_key(&mut self, code: KeyCode) -> Outcome {
        self.handle(Key::from_code(code))
    }

    /// Handle a classified key press
    pub fn handle(&mut self, key: Key) -> Outcome {
        let c = key.to_char();
        let accepted = match key {
            Key::Command(cmd) if cmd.takes_reserved_slot() => self.buffer.push_marker(c),
            _ => self.buffer.push_char(c),
        };
        if accepted.is_err() {
            return Outcome::Dropped(c);
        }

        let transition = Transition::from_last(c);
        match transition {
            Transition::Append(c) => {
                self.echo(&[c]);
                Outcome::Appended(c)
            }
            // Marker and the character it erases
            Transition::Backspace => match self.buffer.remove_last(2) {
                Ok(()) => {
                    let result = self.display.erase_last_char();
                    self.note_display(result);
                    Outcome::Erased
                }
                Err(_) => {
                    self.strip_marker(transition);
                    Outcome::BackspaceIgnored
                }
            },
            Transition::ClearAll => {
                self.buffer.clear();
                let result = self.display.clear();
                self.note_display(result);
                Outcome::Cleared
            }
            Transition::InsertDemo => {
                let marker_at = self.buffer.len() - 1;
                self.buffer.replace_with(DEMO_SEQUENCE);

                // The screen is not cleared: only the part of the new text
                // from the marker's position onward is printed at the cursor.
                let from = marker_at.min(self.buffer.len());
                let mut tail = [0u8; SLOTS];
                let tail_len = self.buffer.len() - from;
                tail[..tail_len].copy_from_slice(&self.buffer.as_bytes()[from..]);
                self.echo(&tail[..tail_len]);
                Outcome::DemoInserted
            }
            Transition::Finalize => self.finalize(transition),
        }
    }

    fn finalize(&mut self, transition: Transition) -> Outcome {
        self.strip_marker(transition);

        let result = self.display.move_cursor(STATUS_LINE, 0);
        self.note_display(result);
        let result = self.display.write_text(SENDING_TEXT);
        self.note_display(result);

        let len = self.buffer.len();
        if self.transmitter.transmit(self.buffer.as_bytes()).is_err() {
            self.transmit_faults = self.transmit_faults.saturating_add(1);
        }

        let result = self.display.clear();
        self.note_display(result);
        self.buffer.clear();

        Outcome::Sent { len }
    }

    fn strip_marker(&mut self, transition: Transition) {
        if let Some(marker) = transition.marker() {
            self.buffer.strip_marker(marker);
        }
    }

    fn echo(&mut self, text: &[u8]) {
        if text.is_empty() {
            return;
        }
        // Buffer contents are printable ASCII
        let text = core::str::from_utf8(text).unwrap_or("");
        let result = self.display.write_text(text);
        self.note_display(result);
    }

    fn note_display(&mut self, result: Result<(), DisplayError>) {
        if result.is_err() {
            self.display_faults = self.display_faults.saturating_add(1);
        }
    }

    /// Current message (no command marker is ever left behind)
    pub fn buffer(&self) -> &MessageBuffer<SLOTS> {
        &self.buffer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }

    /// Display operations that failed since startup
    pub fn display_faults(&self) -> u32 {
        self.display_faults
    }

    /// Transmissions that failed since startup
    pub fn transmit_faults(&self) -> u32 {
        self.transmit_faults
    }
}
