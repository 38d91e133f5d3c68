//! Board-agnostic core logic for the keypad terminal
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Keypad layout and command key classification
//! - Bounded message buffer
//! - Single-slot key mailbox shared with the scanner context
//! - Editing state machine and the editor that drives display/transmitter
//! - Hardware abstraction traits (display, transmitter)
//! - Configuration types and the embedded config parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod editor;
pub mod keypad;
pub mod mailbox;
pub mod state;
pub mod traits;

pub use buffer::{BufferError, MessageBuffer};
pub use editor::Editor;
pub use keypad::{Command, Key, KeyCode};
pub use mailbox::KeyMailbox;
pub use state::{Outcome, Transition};

/// Payload characters a message can hold (one display line)
pub const MESSAGE_CAPACITY: usize = 16;

/// Buffer slots: the payload plus one slot for a trailing command marker
pub const MESSAGE_SLOTS: usize = MESSAGE_CAPACITY + 1;
