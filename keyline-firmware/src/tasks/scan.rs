//! Keypad scan task
//!
//! Sweeps the matrix on a fixed period and hands confirmed presses to the
//! editor. A held key blocks this task until release, which only delays
//! further scans.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Delay, Duration, Ticker};

use keyline_drivers::keypad::MatrixScanner;

use crate::channels::{KEY_MAILBOX, KEY_READY};

/// Scanner wired to the board pins
pub type Scanner = MatrixScanner<Output<'static>, Input<'static>, Delay>;

#[embassy_executor::task]
pub async fn scan_task(mut scanner: Scanner, period_ms: u32) {
    info!("Scan task started ({}ms period)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        ticker.next().await;

        match scanner.scan_into(&KEY_MAILBOX) {
            Ok(Some(key)) => {
                debug!("Key {} at ({}, {})", key.to_char() as char, key.row(), key.col());
                KEY_READY.signal(());
            }
            Ok(None) => {}
            Err(e) => match e {},
        }
    }
}
