//! Configuration types and parsing
//!
//! The firmware embeds a `terminal.toml` that is validated at build time
//! and parsed again at boot with the no_std parser in [`toml`].

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
