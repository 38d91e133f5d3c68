//! 4×4 keypad layout and key classification
//!
//! ```text
//!        col0 col1 col2 col3
//! row0    1    2    3    A
//! row1    4    5    6    B
//! row2    7    8    9    C
//! row3    *    0    #    D
//! ```
//!
//! `*`, `#`, `A` and `D` are commands; every other key is message text.

/// Number of row drive lines
pub const ROWS: usize = 4;

/// Number of column sense lines
pub const COLS: usize = 4;

/// Character printed on each key, indexed `[row][col]`
pub const KEYMAP: [[u8; COLS]; ROWS] = [
    [b'1', b'2', b'3', b'A'],
    [b'4', b'5', b'6', b'B'],
    [b'7', b'8', b'9', b'C'],
    [b'*', b'0', b'#', b'D'],
];

/// Position of a key in the matrix (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode {
    row: u8,
    col: u8,
}

impl KeyCode {
    /// Create a key code, rejecting positions outside the matrix
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < ROWS && (col as usize) < COLS {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Key from its row-major index (0-15)
    pub const fn from_index(index: u8) -> Option<Self> {
        Self::new(index / COLS as u8, index % COLS as u8)
    }

    /// Row-major index (0-15); lower index wins scan ties
    pub const fn index(self) -> u8 {
        self.row * COLS as u8 + self.col
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Character printed on the key
    pub const fn to_char(self) -> u8 {
        KEYMAP[self.row as usize][self.col as usize]
    }

    /// Find the key carrying a character
    pub fn from_char(c: u8) -> Option<Self> {
        (0..(ROWS * COLS) as u8)
            .filter_map(Self::from_index)
            .find(|key| key.to_char() == c)
    }
}

/// Editing commands bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `*`: remove the last character
    Backspace,
    /// `D`: empty the buffer and the display
    ClearAll,
    /// `A`: load the fixed "012345" test message
    InsertDemo,
    /// `#`: transmit the message and start over
    Finalize,
}

impl Command {
    /// Command bound to a key character, if any
    pub const fn from_char(c: u8) -> Option<Self> {
        match c {
            b'*' => Some(Command::Backspace),
            b'D' => Some(Command::ClearAll),
            b'A' => Some(Command::InsertDemo),
            b'#' => Some(Command::Finalize),
            _ => None,
        }
    }

    /// Character that marks this command in the buffer
    pub const fn marker(self) -> u8 {
        match self {
            Command::Backspace => b'*',
            Command::ClearAll => b'D',
            Command::InsertDemo => b'A',
            Command::Finalize => b'#',
        }
    }

    /// Accepted even when the message is full
    ///
    /// `A` replaces the message instead of acting on it, so it is held to
    /// the same limit as text.
    pub const fn takes_reserved_slot(self) -> bool {
        !matches!(self, Command::InsertDemo)
    }
}

/// Meaning of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Message text
    Char(u8),
    /// Editing command
    Command(Command),
}

impl Key {
    /// Classify a character
    pub const fn from_char(c: u8) -> Self {
        match Command::from_char(c) {
            Some(cmd) => Key::Command(cmd),
            None => Key::Char(c),
        }
    }

    /// Classify a matrix position
    pub const fn from_code(code: KeyCode) -> Self {
        Self::from_char(code.to_char())
    }

    /// Character this key puts in the buffer
    pub const fn to_char(self) -> u8 {
        match self {
            Key::Char(c) => c,
            Key::Command(cmd) => cmd.marker(),
        }
    }

    pub const fn is_command(self) -> bool {
        matches!(self, Key::Command(_))
    }
}
