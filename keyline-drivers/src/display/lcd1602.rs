//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The controller runs in 4-bit mode. Every byte goes out as two nibbles,
//! each clocked by raising and dropping the enable line through the
//! expander:
//!
//! ```text
//! PCF8574 bit:  7  6  5  4  3   2  1   0
//! LCD line:     D7 D6 D5 D4 BL  E  RW  RS
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use keyline_core::config::DisplayConfig;
use keyline_core::traits::{DisplayDriver, DisplayError};

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const REGISTER_SELECT: u8 = 0x01;

/// DDRAM offset of each line start
const LINE_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Splash text shown at boot, one entry per line
const SPLASH: [&str; 2] = ["Senior", "Capstone"];

/// How long the splash stays up (ms)
const SPLASH_HOLD_MS: u32 = 500;

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const DISPLAY_ON_CURSOR_BLINK: u8 = 0x0F;
    pub const SHIFT_CURSOR_LEFT: u8 = 0x10;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// 16x2 (or 20x4) character LCD driver
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    config: DisplayConfig,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, config: DisplayConfig) -> Self {
        Self { i2c, delay, config }
    }

    /// Put the controller in 4-bit, 2-line mode with a blinking cursor
    ///
    /// Shows the splash first when enabled in the configuration. The
    /// screen is left clear with the cursor at the top-left.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::RETURN_HOME)?;
        self.command(cmd::FUNCTION_4BIT_2LINE)?;
        self.clear()?;
        self.command(cmd::DISPLAY_ON_CURSOR_BLINK)?;

        if self.config.splash {
            for (line, text) in SPLASH.iter().enumerate() {
                let col = self.config.columns.saturating_sub(text.len() as u8) / 2;
                self.move_cursor(line as u8, col)?;
                self.write_text(text)?;
            }
            self.delay.delay_ms(SPLASH_HOLD_MS);
            self.clear()?;
        }

        Ok(())
    }

    /// Current configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write_byte(command, 0)?;
        self.delay.delay_ms(1);
        Ok(())
    }

    fn data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.write_byte(byte, REGISTER_SELECT)
    }

    fn write_byte(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        let high = (byte & 0xF0) | mode | BACKLIGHT;
        let low = ((byte & 0x0F) << 4) | mode | BACKLIGHT;
        self.transfer(&[high | ENABLE, high, low | ENABLE, low])
    }

    /// Write to the expander, retrying when the address is not acknowledged
    fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let attempts = self.config.bus_retries.max(1);

        for _ in 0..attempts {
            match self.i2c.write(self.config.i2c_address, bytes) {
                Ok(()) => return Ok(()),
                Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => continue,
                Err(_) => return Err(DisplayError::Bus),
            }
        }

        Err(DisplayError::Bus)
    }
}

impl<I2C, D> DisplayDriver for Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.write_byte(cmd::CLEAR, 0)?;
        // Clear takes 1.52 ms on the controller
        self.delay.delay_ms(2);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.data(byte)?;
        }
        Ok(())
    }

    fn move_cursor(&mut self, line: u8, col: u8) -> Result<(), DisplayError> {
        let lines = self.config.lines.min(LINE_OFFSETS.len() as u8);
        if line >= lines || col >= self.config.columns {
            return Err(DisplayError::InvalidPosition);
        }

        let address = LINE_OFFSETS[line as usize]
            .checked_add(col)
            .filter(|&addr| addr < cmd::SET_DDRAM_ADDR)
            .ok_or(DisplayError::InvalidPosition)?;
        self.command(cmd::SET_DDRAM_ADDR | address)
    }

    fn erase_last_char(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::SHIFT_CURSOR_LEFT)?;
        self.data(b' ')?;
        self.command(cmd::SHIFT_CURSOR_LEFT)
    }
}
