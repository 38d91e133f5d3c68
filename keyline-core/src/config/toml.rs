//! Minimal TOML parser for the terminal configuration
//!
//! Handles only the subset `terminal.toml` uses; it is NOT a general TOML
//! parser.
//!
//! Supported:
//! - `[timing]`, `[display]` and `[framing]` section headers
//! - Key = value pairs (decimal or `0x` hex integer, boolean)
//! - Comments (# ...), including trailing ones
//!
//! Unknown sections and keys are rejected so a typo never silently falls
//! back to a default.

use super::types::{ConfigError, TerminalConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed or unknown section header
    InvalidSection { line: usize },
    /// Line is not a `key = value` pair
    InvalidLine { line: usize },
    /// Key not known in the current section
    UnknownKey { line: usize },
    /// Value has the wrong type or is out of range
    InvalidValue { line: usize },
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Invalid(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Display,
    Framing,
}

/// Parse TOML text into a validated [`TerminalConfig`]
///
/// Keys that are absent keep their default value.
pub fn parse_config(input: &str) -> Result<TerminalConfig, ParseError> {
    let mut config = TerminalConfig::default();
    let mut section = Section::Root;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            section = parse_section_header(name.trim())
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn apply(
    config: &mut TerminalConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ParseError> {
    let unknown = ParseError::UnknownKey { line };

    match section {
        Section::Root => return Err(unknown),
        Section::Timing => {
            let timing = &mut config.timing;
            match key {
                "scan_period_ms" => timing.scan_period_ms = parse_int(value, line)?,
                "settle_ms" => timing.settle_ms = parse_int(value, line)?,
                "pulse_half_ms" => timing.pulse_half_ms = parse_int(value, line)?,
                _ => return Err(unknown),
            }
        }
        Section::Display => {
            let display = &mut config.display;
            match key {
                "i2c_address" => display.i2c_address = parse_int(value, line)?,
                "columns" => display.columns = parse_int(value, line)?,
                "lines" => display.lines = parse_int(value, line)?,
                "bus_retries" => display.bus_retries = parse_int(value, line)?,
                "splash" => display.splash = parse_bool(value, line)?,
                _ => return Err(unknown),
            }
        }
        Section::Framing => {
            let framing = &mut config.framing;
            match key {
                "passes" => framing.passes = parse_int(value, line)?,
                "marker_repeats" => framing.marker_repeats = parse_int(value, line)?,
                _ => return Err(unknown),
            }
        }
    }

    Ok(())
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name {
        "timing" => Some(Section::Timing),
        "display" => Some(Section::Display),
        "framing" => Some(Section::Framing),
        _ => None,
    }
}

/// Drop a trailing `# comment`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a decimal or `0x` hex integer; `_` separators are allowed
fn parse_int<T: TryFrom<u32>>(value: &str, line: usize) -> Result<T, ParseError> {
    let invalid = ParseError::InvalidValue { line };

    let (digits, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    let mut acc: u32 = 0;
    let mut seen = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix).ok_or(invalid)?;
        acc = acc
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(invalid)?;
        seen = true;
    }
    if !seen {
        return Err(invalid);
    }

    T::try_from(acc).map_err(|_| invalid)
}

fn parse_bool(value: &str, line: usize) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue { line }),
    }
}
