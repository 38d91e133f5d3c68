//! Hardware abstraction traits
//!
//! These traits define the interface between the editing logic and the
//! hardware-specific display and transmitter implementations.

pub mod display;
pub mod transmitter;

pub use display::{DisplayDriver, DisplayError};
pub use transmitter::Transmitter;
