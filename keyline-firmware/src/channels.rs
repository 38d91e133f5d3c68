//! State shared between the scan and editor tasks
//!
//! The scan task runs on the interrupt executor and may preempt the editor
//! at any point, so everything here is interrupt-safe.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use keyline_core::KeyMailbox;

/// Most recent unconsumed key press (last key wins)
pub static KEY_MAILBOX: KeyMailbox = KeyMailbox::new();

/// Wakes the editor after a press has been published
pub static KEY_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
