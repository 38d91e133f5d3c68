//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in keyline-core, written against embedded-hal 1.0 so they run on any
//! board and against host mocks:
//!
//! - Keypad matrix scanner (4 row drives, 4 column senses)
//! - Strobe transmitter (4-bit data bus plus strobe line)
//! - Character LCD (HD44780 behind a PCF8574 I2C backpack)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod keypad;
pub mod transmitter;
