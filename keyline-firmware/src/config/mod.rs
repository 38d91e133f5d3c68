//! Configuration loading
//!
//! The TOML text is compiled into the firmware; build.rs has already
//! checked it, so falling back to defaults here means the two parsers
//! disagree.

use defmt::*;

use keyline_core::config::{parse_config, TerminalConfig};

/// Parse the embedded configuration, or fall back to defaults
pub fn load(text: &str) -> TerminalConfig {
    match parse_config(text) {
        Ok(config) => {
            info!(
                "Config: scan={}ms settle={}ms pulse={}ms passes={}",
                config.timing.scan_period_ms,
                config.timing.settle_ms,
                config.timing.pulse_half_ms,
                config.framing.passes
            );
            config
        }
        Err(e) => {
            warn!("Embedded config rejected ({}), using defaults", e);
            TerminalConfig::default()
        }
    }
}
