//! Frame encoding for the nibble-bus transmitter.
//!
//! Stream format:
//! - PREAMBLE: `MARKER_REPEATS` runs of `MARKER_WIDTH` × 0xA
//! - PASS: every payload byte as low nibble, high nibble
//! - INTERIM: `MARKER_REPEATS` runs of `MARKER_WIDTH` × 0xB after each pass
//! - PASS + INTERIM repeated `PASS_COUNT` times
//! - POSTAMBLE: same pattern as the preamble

use crate::nibble::Nibble;

/// Marker value opening and closing a transmission
pub const PREAMBLE: Nibble = Nibble::low(0xA);

/// Marker value closing each payload pass
pub const INTERIM: Nibble = Nibble::low(0xB);

/// Number of times each marker run is repeated
pub const MARKER_REPEATS: u8 = 3;

/// Pulses per marker run
pub const MARKER_WIDTH: usize = 2;

/// Number of payload passes per transmission
pub const PASS_COUNT: u8 = 7;

/// Repetition settings for a transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FramingConfig {
    /// Payload passes per transmission
    pub passes: u8,
    /// Marker runs per preamble, interim and postamble
    pub marker_repeats: u8,
}

impl FramingConfig {
    /// Framing used by the deployed receivers
    pub const DEFAULT: Self = Self {
        passes: PASS_COUNT,
        marker_repeats: MARKER_REPEATS,
    };

    const fn marker_len(self) -> usize {
        self.marker_repeats as usize * MARKER_WIDTH
    }
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Portion of the stream currently being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    /// Opening marker runs
    Preamble,
    /// Payload nibbles of the given pass (0-based)
    Payload(u8),
    /// Marker runs closing the given pass
    Interim(u8),
    /// Closing marker runs
    Postamble,
    /// Stream exhausted
    Done,
}

/// Message bytes up to (not including) the first NUL
///
/// Slots past the end of a message are zero-filled, so a buffer can be
/// handed over whole.
pub fn payload_of(buffer: &[u8]) -> &[u8] {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    &buffer[..end]
}

/// Total number of pulses for a payload of `payload_len` bytes
pub const fn encoded_len(payload_len: usize, config: FramingConfig) -> usize {
    let marker = config.marker_len();
    2 * marker + config.passes as usize * (2 * payload_len + marker)
}

/// Lazy encoder yielding the full pulse sequence for one message
///
/// Nothing is buffered, so the payload size is not limited.
#[derive(Debug, Clone)]
pub struct FrameEncoder<'a> {
    payload: &'a [u8],
    config: FramingConfig,
    segment: Segment,
    /// Position within the current segment
    pos: usize,
}

impl<'a> FrameEncoder<'a> {
    /// Encode `payload` with the default framing
    pub fn new(payload: &'a [u8]) -> Self {
        Self::with_config(payload, FramingConfig::DEFAULT)
    }

    /// Encode `payload` with explicit framing
    pub fn with_config(payload: &'a [u8], config: FramingConfig) -> Self {
        Self {
            payload: payload_of(payload),
            config,
            segment: Segment::Preamble,
            pos: 0,
        }
    }

    /// Payload actually being sent (NUL padding removed)
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Segment the next nibble belongs to
    pub fn segment(&self) -> Segment {
        self.segment
    }
}

impl Iterator for FrameEncoder<'_> {
    type Item = Nibble;

    fn next(&mut self) -> Option<Nibble> {
        let marker_len = self.config.marker_len();

        loop {
            match self.segment {
                Segment::Preamble => {
                    if self.pos < marker_len {
                        self.pos += 1;
                        return Some(PREAMBLE);
                    }
                    self.pos = 0;
                    self.segment = if self.config.passes == 0 {
                        Segment::Postamble
                    } else {
                        Segment::Payload(0)
                    };
                }
                Segment::Payload(pass) => {
                    if self.pos < self.payload.len() * 2 {
                        let nibble = Nibble::split(self.payload[self.pos / 2])[self.pos % 2];
                        self.pos += 1;
                        return Some(nibble);
                    }
                    self.pos = 0;
                    self.segment = Segment::Interim(pass);
                }
                Segment::Interim(pass) => {
                    if self.pos < marker_len {
                        self.pos += 1;
                        return Some(INTERIM);
                    }
                    self.pos = 0;
                    let next = pass + 1;
                    self.segment = if next < self.config.passes {
                        Segment::Payload(next)
                    } else {
                        Segment::Postamble
                    };
                }
                Segment::Postamble => {
                    if self.pos < marker_len {
                        self.pos += 1;
                        return Some(PREAMBLE);
                    }
                    self.pos = 0;
                    self.segment = Segment::Done;
                }
                Segment::Done => return None,
            }
        }
    }
}
