//! Row-driven 4x4 matrix scanner
//!
//! Rows are driven high one at a time; a closed contact pulls its column
//! input high. A contact has to still be closed after the settle delay
//! to count, and the scanner then blocks until it opens again so a held
//! key produces exactly one event.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use keyline_core::keypad::{COLS, ROWS};
use keyline_core::{KeyCode, KeyMailbox};

/// Scanner timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Wait between first contact and the confirming re-read (ms)
    pub settle_ms: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { settle_ms: 10 }
    }
}

/// Matrix keypad scanner
pub struct MatrixScanner<R, C, D> {
    rows: [R; ROWS],
    cols: [C; COLS],
    delay: D,
    config: ScanConfig,
}

impl<R, C, D, E> MatrixScanner<R, C, D>
where
    R: OutputPin<Error = E>,
    C: InputPin<Error = E>,
    D: DelayNs,
{
    /// Create a scanner; row outputs are expected to start low
    pub fn new(rows: [R; ROWS], cols: [C; COLS], delay: D, config: ScanConfig) -> Self {
        Self {
            rows,
            cols,
            delay,
            config,
        }
    }

    /// Sweep the matrix once
    ///
    /// Returns the first confirmed key in row-major order, after it has
    /// been released. The driven row is set low again on every path.
    pub fn scan(&mut self) -> Result<Option<KeyCode>, E> {
        for row in 0..ROWS {
            self.rows[row].set_high()?;
            let found = self.sense_row(row);
            let deactivated = self.rows[row].set_low();

            let found = found?;
            deactivated?;

            if found.is_some() {
                return Ok(found);
            }
        }

        Ok(None)
    }

    /// Sweep the matrix and publish a confirmed key into `mailbox`
    ///
    /// An event still waiting in the mailbox is overwritten.
    pub fn scan_into(&mut self, mailbox: &KeyMailbox) -> Result<Option<KeyCode>, E> {
        let found = self.scan()?;
        if let Some(key) = found {
            mailbox.publish(key);
        }
        Ok(found)
    }

    /// Current timing
    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Release the pins and delay
    pub fn release(self) -> ([R; ROWS], [C; COLS], D) {
        (self.rows, self.cols, self.delay)
    }

    fn sense_row(&mut self, row: usize) -> Result<Option<KeyCode>, E> {
        for col in 0..COLS {
            if !self.cols[col].is_high()? {
                continue;
            }

            self.delay.delay_ms(self.config.settle_ms);
            if !self.cols[col].is_high()? {
                // Bounce
                continue;
            }

            // Hold until release; no timeout
            while self.cols[col].is_high()? {}

            return Ok(KeyCode::new(row as u8, col as u8));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        RowHigh(usize),
        RowLow(usize),
        Delay(u32),
    }

    /// Simulated key matrix
    #[derive(Default)]
    struct Bench {
        active_row: Option<usize>,
        /// High reads left before each contact opens
        contacts: [[u32; COLS]; ROWS],
        log: Vec<Event>,
    }

    type Shared = Rc<RefCell<Bench>>;

    struct RowPin {
        idx: usize,
        bench: Shared,
    }

    impl ErrorType for RowPin {
        type Error = Infallible;
    }

    impl OutputPin for RowPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            let mut bench = self.bench.borrow_mut();
            if bench.active_row == Some(self.idx) {
                bench.active_row = None;
            }
            bench.log.push(Event::RowLow(self.idx));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut bench = self.bench.borrow_mut();
            bench.active_row = Some(self.idx);
            bench.log.push(Event::RowHigh(self.idx));
            Ok(())
        }
    }

    struct ColPin {
        idx: usize,
        bench: Shared,
    }

    impl ErrorType for ColPin {
        type Error = Infallible;
    }

    impl InputPin for ColPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            let mut bench = self.bench.borrow_mut();
            let Some(row) = bench.active_row else {
                return Ok(false);
            };
            let contact = &mut bench.contacts[row][self.idx];
            if *contact > 0 {
                *contact -= 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay {
        bench: Shared,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.delay_ms(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.bench.borrow_mut().log.push(Event::Delay(ms));
        }
    }

    fn scanner(bench: &Shared) -> MatrixScanner<RowPin, ColPin, MockDelay> {
        let rows = core::array::from_fn(|idx| RowPin {
            idx,
            bench: bench.clone(),
        });
        let cols = core::array::from_fn(|idx| ColPin {
            idx,
            bench: bench.clone(),
        });
        MatrixScanner::new(
            rows,
            cols,
            MockDelay {
                bench: bench.clone(),
            },
            ScanConfig::default(),
        )
    }

    fn log(bench: &Shared) -> Vec<Event> {
        bench.borrow().log.clone()
    }

    #[test]
    fn test_idle_sweeps_all_rows() {
        let bench = Shared::default();
        let mut scanner = scanner(&bench);

        assert_eq!(scanner.scan(), Ok(None));
        assert_eq!(
            log(&bench),
            vec![
                Event::RowHigh(0),
                Event::RowLow(0),
                Event::RowHigh(1),
                Event::RowLow(1),
                Event::RowHigh(2),
                Event::RowLow(2),
                Event::RowHigh(3),
                Event::RowLow(3),
            ]
        );
        assert_eq!(bench.borrow().active_row, None);
    }

    #[test]
    fn test_press_reported_after_release() {
        let bench = Shared::default();
        bench.borrow_mut().contacts[2][1] = 10;
        let mut scanner = scanner(&bench);

        let key = scanner.scan().unwrap().unwrap();
        assert_eq!(key.to_char(), b'8');
        assert_eq!(bench.borrow().contacts[2][1], 0);

        let events = log(&bench);
        assert_eq!(&events[events.len() - 3..], &[
            Event::RowHigh(2),
            Event::Delay(10),
            Event::RowLow(2),
        ]);
    }

    #[test]
    fn test_lowest_row_wins() {
        let bench = Shared::default();
        {
            let mut b = bench.borrow_mut();
            b.contacts[0][2] = 5;
            b.contacts[1][0] = 5;
        }
        let mut scanner = scanner(&bench);

        assert_eq!(scanner.scan(), Ok(KeyCode::new(0, 2)));
        // Row 1 was never driven
        assert_eq!(
            log(&bench),
            vec![Event::RowHigh(0), Event::Delay(10), Event::RowLow(0)]
        );
        assert_eq!(bench.borrow().contacts[1][0], 5);

        // Next sweep picks up the other key
        assert_eq!(scanner.scan(), Ok(KeyCode::new(1, 0)));
    }

    #[test]
    fn test_lowest_column_wins_within_row() {
        let bench = Shared::default();
        {
            let mut b = bench.borrow_mut();
            b.contacts[3][3] = 3;
            b.contacts[3][1] = 3;
        }
        let mut scanner = scanner(&bench);

        let key = scanner.scan().unwrap().unwrap();
        assert_eq!(key.to_char(), b'0');
    }

    #[test]
    fn test_bounce_rejected() {
        let bench = Shared::default();
        // Closed for the first read only
        bench.borrow_mut().contacts[1][1] = 1;
        let mut scanner = scanner(&bench);

        assert_eq!(scanner.scan(), Ok(None));
        let events = log(&bench);
        assert_eq!(
            events.iter().filter(|e| matches!(e, Event::Delay(_))).count(),
            1
        );
        assert_eq!(events.last(), Some(&Event::RowLow(3)));
        assert_eq!(bench.borrow().active_row, None);
    }

    #[test]
    fn test_bounce_then_real_press_in_same_row() {
        let bench = Shared::default();
        {
            let mut b = bench.borrow_mut();
            b.contacts[0][0] = 1;
            b.contacts[0][3] = 4;
        }
        let mut scanner = scanner(&bench);

        let key = scanner.scan().unwrap().unwrap();
        assert_eq!(key.to_char(), b'A');
    }

    #[test]
    fn test_scan_into_publishes() {
        let bench = Shared::default();
        let mailbox = KeyMailbox::new();
        let mut scanner = scanner(&bench);

        assert_eq!(scanner.scan_into(&mailbox), Ok(None));
        assert!(!mailbox.is_pending());

        bench.borrow_mut().contacts[3][2] = 3;
        assert_eq!(scanner.scan_into(&mailbox), Ok(KeyCode::new(3, 2)));
        assert_eq!(mailbox.peek(), KeyCode::new(3, 2));

        // Unconsumed event is overwritten
        bench.borrow_mut().contacts[0][0] = 3;
        scanner.scan_into(&mailbox).unwrap();
        assert_eq!(mailbox.take(), KeyCode::new(0, 0));
        assert_eq!(mailbox.take(), None);
    }
}
