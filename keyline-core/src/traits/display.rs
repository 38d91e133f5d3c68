//! Character display trait

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed (no acknowledge after retries)
    Bus,
    /// Cursor position outside the display
    InvalidPosition,
}

/// Trait for a text display with a write cursor
///
/// The display keeps its own cursor; `write_text` prints at the cursor and
/// advances it, `erase_last_char` blanks the cell before the cursor and
/// moves back onto it.
pub trait DisplayDriver {
    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Print text at the cursor
    fn write_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `line`: Line number (0-based)
    /// - `col`: Column number (0-based)
    fn move_cursor(&mut self, line: u8, col: u8) -> Result<(), DisplayError>;

    /// Blank the character before the cursor and step back
    fn erase_last_char(&mut self) -> Result<(), DisplayError>;
}

impl<T: DisplayDriver + ?Sized> DisplayDriver for &mut T {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).write_text(text)
    }

    fn move_cursor(&mut self, line: u8, col: u8) -> Result<(), DisplayError> {
        (**self).move_cursor(line, col)
    }

    fn erase_last_char(&mut self) -> Result<(), DisplayError> {
        (**self).erase_last_char()
    }
}
