//! Parallel nibble bus with a level strobe
//!
//! Each nibble is put on the 4 data lines, then the strobe is held low
//! for one half-period and high for another. The strobe idles high, so
//! a receiver latches the bus on the falling edge.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use keyline_core::traits::Transmitter;
use keyline_protocol::{FrameEncoder, FramingConfig, Nibble};

/// Strobe timing and frame repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
    /// Strobe low time, and the strobe high time that follows (ms)
    pub half_period_ms: u32,
    /// Frame repetition settings
    pub framing: FramingConfig,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            half_period_ms: 70,
            framing: FramingConfig::DEFAULT,
        }
    }
}

/// Nibble-bus transmitter
///
/// `P` are the data lines, bit 0 first; `S` is the strobe.
pub struct StrobeTransmitter<P, S, D> {
    bus: [P; 4],
    strobe: S,
    delay: D,
    config: PulseConfig,
}

impl<P, S, D, E> StrobeTransmitter<P, S, D>
where
    P: OutputPin<Error = E>,
    S: OutputPin<Error = E>,
    D: DelayNs,
{
    pub fn new(bus: [P; 4], strobe: S, delay: D, config: PulseConfig) -> Self {
        Self {
            bus,
            strobe,
            delay,
            config,
        }
    }

    /// Put the strobe in its idle (high) state
    pub fn idle(&mut self) -> Result<(), E> {
        self.strobe.set_high()
    }

    /// Send one nibble
    pub fn pulse(&mut self, nibble: Nibble) -> Result<(), E> {
        for (bit, pin) in self.bus.iter_mut().enumerate() {
            if nibble.bit(bit as u8) {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }

        self.strobe.set_low()?;
        self.delay.delay_ms(self.config.half_period_ms);
        self.strobe.set_high()?;
        self.delay.delay_ms(self.config.half_period_ms);

        Ok(())
    }

    /// Send the complete framed stream for `payload`
    ///
    /// Returns the number of pulses sent. Blocks for the whole stream.
    pub fn send_frame(&mut self, payload: &[u8]) -> Result<usize, E> {
        let mut sent = 0;
        for nibble in FrameEncoder::with_config(payload, self.config.framing) {
            self.pulse(nibble)?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Current configuration
    pub fn config(&self) -> PulseConfig {
        self.config
    }

    /// Release the pins and delay
    pub fn release(self) -> ([P; 4], S, D) {
        (self.bus, self.strobe, self.delay)
    }
}

impl<P, S, D, E> Transmitter for StrobeTransmitter<P, S, D>
where
    P: OutputPin<Error = E>,
    S: OutputPin<Error = E>,
    D: DelayNs,
{
    type Error = E;

    fn transmit(&mut self, payload: &[u8]) -> Result<(), E> {
        self.send_frame(payload).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use keyline_protocol::encoded_len;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Bus(usize, bool),
        Strobe(bool),
        Delay(u32),
    }

    /// Simulated receiver latching on the strobe falling edge
    #[derive(Default)]
    struct Wire {
        bus: [bool; 4],
        strobe: bool,
        latched: Vec<u8>,
        log: Vec<Event>,
    }

    impl Wire {
        fn bus_value(&self) -> u8 {
            self.bus
                .iter()
                .enumerate()
                .fold(0, |acc, (i, &b)| acc | ((b as u8) << i))
        }
    }

    type Shared = Rc<RefCell<Wire>>;

    struct BusPin {
        idx: usize,
        wire: Shared,
    }

    impl ErrorType for BusPin {
        type Error = Infallible;
    }

    impl OutputPin for BusPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            let mut wire = self.wire.borrow_mut();
            wire.bus[self.idx] = false;
            wire.log.push(Event::Bus(self.idx, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut wire = self.wire.borrow_mut();
            wire.bus[self.idx] = true;
            wire.log.push(Event::Bus(self.idx, true));
            Ok(())
        }
    }

    struct StrobePin {
        wire: Shared,
    }

    impl ErrorType for StrobePin {
        type Error = Infallible;
    }

    impl OutputPin for StrobePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            let mut wire = self.wire.borrow_mut();
            if wire.strobe {
                let value = wire.bus_value();
                wire.latched.push(value);
            }
            wire.strobe = false;
            wire.log.push(Event::Strobe(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut wire = self.wire.borrow_mut();
            wire.strobe = true;
            wire.log.push(Event::Strobe(true));
            Ok(())
        }
    }

    struct MockDelay {
        wire: Shared,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.delay_ms(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.wire.borrow_mut().log.push(Event::Delay(ms));
        }
    }

    fn transmitter(
        wire: &Shared,
        config: PulseConfig,
    ) -> StrobeTransmitter<BusPin, StrobePin, MockDelay> {
        let bus = core::array::from_fn(|idx| BusPin {
            idx,
            wire: wire.clone(),
        });
        let mut tx = StrobeTransmitter::new(
            bus,
            StrobePin { wire: wire.clone() },
            MockDelay { wire: wire.clone() },
            config,
        );
        tx.idle().unwrap();
        wire.borrow_mut().log.clear();
        tx
    }

    #[test]
    fn test_single_pulse_sequence() {
        let wire = Shared::default();
        let mut tx = transmitter(&wire, PulseConfig::default());

        tx.pulse(Nibble::low(0x5)).unwrap();

        assert_eq!(
            wire.borrow().log,
            vec![
                Event::Bus(0, true),
                Event::Bus(1, false),
                Event::Bus(2, true),
                Event::Bus(3, false),
                Event::Strobe(false),
                Event::Delay(70),
                Event::Strobe(true),
                Event::Delay(70),
            ]
        );
        assert_eq!(wire.borrow().latched, vec![0x5]);
    }

    #[test]
    fn test_frame_latched_by_receiver() {
        let wire = Shared::default();
        let mut tx = transmitter(&wire, PulseConfig::default());

        let sent = tx.send_frame(b"12\0\0").unwrap();
        assert_eq!(sent, encoded_len(2, FramingConfig::DEFAULT));

        let expected: Vec<u8> = FrameEncoder::new(b"12").map(Nibble::value).collect();
        let wire = wire.borrow();
        assert_eq!(wire.latched, expected);
        assert_eq!(&wire.latched[6..10], &[0x1, 0x3, 0x2, 0x3]);
        // Idles high after the last pulse
        assert!(wire.strobe);
    }

    #[test]
    fn test_symmetric_timing() {
        let wire = Shared::default();
        let config = PulseConfig {
            half_period_ms: 3,
            framing: FramingConfig {
                passes: 1,
                marker_repeats: 1,
            },
        };
        let mut tx = transmitter(&wire, config);

        tx.transmit(b"9").unwrap();

        let wire = wire.borrow();
        let delays: Vec<u32> = wire
            .log
            .iter()
            .filter_map(|e| match e {
                Event::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        // 2 + 2 + 2 + 2 pulses, two waits each
        assert_eq!(delays, vec![3; 16]);
        assert_eq!(wire.latched, vec![0xA, 0xA, 0x9, 0x3, 0xB, 0xB, 0xA, 0xA]);
    }

    #[test]
    fn test_empty_message_sends_markers() {
        let wire = Shared::default();
        let mut tx = transmitter(&wire, PulseConfig::default());

        tx.transmit(b"").unwrap();
        let wire = wire.borrow();
        assert_eq!(wire.latched.len(), 6 + 7 * 6 + 6);
        assert!(wire.latched.iter().all(|&n| n == 0xA || n == 0xB));
    }
}
