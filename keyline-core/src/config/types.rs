//! Configuration type definitions

use keyline_protocol::FramingConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::editor::STATUS_LINE;

/// Characters per line the HD44780 DDRAM can address
pub const MAX_COLUMNS: u8 = 40;

/// Line count of the largest supported character module
pub const MAX_LINES: u8 = 4;

/// Keypad and transmitter timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TimingConfig {
    /// Interval between keypad sweeps (ms)
    pub scan_period_ms: u32,
    /// Debounce wait before re-checking a closed contact (ms)
    pub settle_ms: u32,
    /// Strobe low time and strobe high time of one pulse (ms)
    pub pulse_half_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scan_period_ms: 250,
            settle_ms: 10,
            pulse_half_ms: 70,
        }
    }
}

/// Character LCD settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the LCD backpack
    pub i2c_address: u8,
    /// Characters per line
    pub columns: u8,
    /// Number of lines
    pub lines: u8,
    /// Attempts per bus write before giving up
    pub bus_retries: u8,
    /// Show the splash text at boot
    pub splash: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x27,
            columns: 16,
            lines: 2,
            bus_retries: 8,
            splash: true,
        }
    }
}

/// Complete terminal configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct TerminalConfig {
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub framing: FramingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Scan period must be non-zero
    ZeroScanPeriod,
    /// Settle time must be shorter than the scan period
    SettleTooLong,
    /// Pulse half-period must be non-zero
    ZeroPulse,
    /// I2C address wider than 7 bits
    InvalidAddress,
    /// Display too small for a message line plus the status line
    DisplayTooSmall,
    /// More columns or lines than the controller can address
    DisplayTooLarge,
    /// At least one payload pass is required
    ZeroPasses,
    /// At least one marker run is required
    ZeroMarkers,
}

impl TerminalConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.scan_period_ms == 0 {
            return Err(ConfigError::ZeroScanPeriod);
        }
        if timing.settle_ms >= timing.scan_period_ms {
            return Err(ConfigError::SettleTooLong);
        }
        if timing.pulse_half_ms == 0 {
            return Err(ConfigError::ZeroPulse);
        }

        let display = &self.display;
        if display.i2c_address > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        if display.lines <= STATUS_LINE || (display.columns as usize) < crate::MESSAGE_CAPACITY {
            return Err(ConfigError::DisplayTooSmall);
        }
        if display.columns > MAX_COLUMNS || display.lines > MAX_LINES {
            return Err(ConfigError::DisplayTooLarge);
        }

        if self.framing.passes == 0 {
            return Err(ConfigError::ZeroPasses);
        }
        if self.framing.marker_repeats == 0 {
            return Err(ConfigError::ZeroMarkers);
        }

        Ok(())
    }
}
