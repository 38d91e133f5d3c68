//! Message transmitters

pub mod strobe;

pub use strobe::{PulseConfig, StrobeTransmitter};
