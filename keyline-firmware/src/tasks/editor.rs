//! Message editor task
//!
//! Sleeps until the scan task signals a press, then applies it. While a
//! message is being transmitted this task blocks; presses made meanwhile
//! are still latched by the scan task, the last one winning.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use keyline_core::{Editor, Outcome, MESSAGE_SLOTS};
use keyline_drivers::display::Lcd1602;
use keyline_drivers::transmitter::StrobeTransmitter;

use crate::channels::{KEY_MAILBOX, KEY_READY};

pub type Display = Lcd1602<I2c<'static, I2C0, Blocking>, Delay>;
pub type Bus = StrobeTransmitter<Output<'static>, Output<'static>, Delay>;
pub type TerminalEditor = Editor<Display, Bus, MESSAGE_SLOTS>;

#[embassy_executor::task]
pub async fn editor_task(mut editor: TerminalEditor) {
    info!("Editor task started");

    let mut display_faults = 0;

    loop {
        KEY_READY.wait().await;

        while let Some(outcome) = editor.poll(&KEY_MAILBOX) {
            match outcome {
                Outcome::Sent { len } => info!("Sent {} chars", len),
                Outcome::Dropped(c) => debug!("Buffer full, dropped {}", c as char),
                other if other.is_noop() => debug!("Ignored: {}", other),
                other => trace!("{}", other),
            }

            if editor.display_faults() != display_faults {
                display_faults = editor.display_faults();
                warn!("Display write failed ({} total)", display_faults);
            }

            trace!("Buffer: \"{}\"", editor.buffer().as_str());
        }
    }
}
