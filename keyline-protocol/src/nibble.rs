//! 4-bit bus values

/// A value that fits on the 4-bit output bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Nibble(u8);

impl Nibble {
    /// Low half of a byte
    pub const fn low(byte: u8) -> Self {
        Self(byte & 0x0F)
    }

    /// High half of a byte
    pub const fn high(byte: u8) -> Self {
        Self((byte & 0xF0) >> 4)
    }

    /// Split a byte into the order it is transmitted: low, then high
    pub const fn split(byte: u8) -> [Self; 2] {
        [Self::low(byte), Self::high(byte)]
    }

    /// Raw 4-bit value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// State of bus line `bit` (0-3) for this value
    pub const fn bit(self, bit: u8) -> bool {
        bit < 4 && (self.0 >> bit) & 1 != 0
    }
}

impl From<Nibble> for u8 {
    fn from(nibble: Nibble) -> Self {
        nibble.0
    }
}
