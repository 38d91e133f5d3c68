//! Keyline - Keypad Message Terminal Firmware
//!
//! A 4x4 keypad fills a short message shown on a character LCD; the `#`
//! key sends it as a framed nibble stream on a 4-bit bus with a strobe.
//!
//! Two execution contexts:
//! - Interrupt executor (SWI_IRQ_1): keypad scan task, preempts everything
//! - Thread executor: editor task, sleeps in WFE between key presses

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use keyline_core::Editor;
use keyline_drivers::display::Lcd1602;
use keyline_drivers::keypad::{MatrixScanner, ScanConfig};
use keyline_drivers::transmitter::{PulseConfig, StrobeTransmitter};

mod channels;
mod config;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit terminal.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../terminal.toml");

static SCAN_EXECUTOR: InterruptExecutor = InterruptExecutor::new();
static MAIN_EXECUTOR: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    SCAN_EXECUTOR.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("Keyline firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);

    // Keypad: rows GPIO2-5 driven, columns GPIO6-9 read with pull-downs
    let rows = [
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    ];
    let cols = [
        Input::new(p.PIN_6, Pull::Down),
        Input::new(p.PIN_7, Pull::Down),
        Input::new(p.PIN_8, Pull::Down),
        Input::new(p.PIN_9, Pull::Down),
    ];
    let scanner = MatrixScanner::new(
        rows,
        cols,
        Delay,
        ScanConfig {
            settle_ms: config.timing.settle_ms,
        },
    );

    // Transmitter: data bus GPIO10-13 (bit 0 first), strobe GPIO14 idling high
    let bus = [
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    ];
    let strobe = Output::new(p.PIN_14, Level::High);
    let transmitter = StrobeTransmitter::new(
        bus,
        strobe,
        Delay,
        PulseConfig {
            half_period_ms: config.timing.pulse_half_ms,
            framing: config.framing,
        },
    );

    // LCD on I2C0: SDA GPIO16, SCL GPIO17
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, I2cConfig::default());
    let mut display = Lcd1602::new(i2c, Delay, config.display);
    match display.init() {
        Ok(()) => info!("Display initialized at {:#x}", config.display.i2c_address),
        Err(e) => warn!("Display init failed: {}", e),
    }

    let editor: tasks::TerminalEditor = Editor::new(display, transmitter);

    interrupt::SWI_IRQ_1.set_priority(Priority::P3);
    let scan_spawner = SCAN_EXECUTOR.start(interrupt::SWI_IRQ_1);
    scan_spawner
        .spawn(tasks::scan_task(scanner, config.timing.scan_period_ms))
        .unwrap();

    let executor = MAIN_EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(tasks::editor_task(editor)).unwrap();
        info!("All tasks spawned, firmware running");
    })
}
