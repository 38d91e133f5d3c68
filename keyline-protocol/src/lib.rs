//! Keyline Transmission Protocol
//!
//! This crate defines how a finished message is laid out on the 4-bit
//! parallel output bus. There is no return channel, so reliability comes
//! entirely from repetition: the payload is sent several times, with marker
//! runs delimiting the start, each pass, and the end of the message.
//!
//! # Stream Layout
//!
//! ```text
//! ┌──────────┬─────────┬─────────┬─────┬─────────┬─────────┬───────────┐
//! │ PREAMBLE │ PASS 1  │ INTERIM │ ... │ PASS 7  │ INTERIM │ POSTAMBLE │
//! │ A A × 3  │ lo hi.. │ B B × 3 │     │ lo hi.. │ B B × 3 │ A A × 3   │
//! └──────────┴─────────┴─────────┴─────┴─────────┴─────────┴───────────┘
//! ```
//!
//! Each payload byte travels as two nibbles, low half first. Every nibble is
//! one strobe pulse on the bus; pulse timing belongs to the transmitter
//! driver, not to this crate.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod nibble;

pub use frame::{
    encoded_len, payload_of, FrameEncoder, FramingConfig, Segment, INTERIM, MARKER_REPEATS,
    MARKER_WIDTH, PASS_COUNT, PREAMBLE,
};
pub use nibble::Nibble;
