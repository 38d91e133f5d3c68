//! Editing state machine
//!
//! The behaviour of each key press is a function of the last accepted
//! character: text is appended, command markers trigger their transition
//! and are then removed from the buffer.

pub mod machine;
pub mod outcome;

pub use machine::{Transition, DEMO_SEQUENCE};
pub use outcome::Outcome;
