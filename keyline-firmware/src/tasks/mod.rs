//! Embassy async tasks
//!
//! The scan task runs on the interrupt executor, the editor on the thread
//! executor. They only talk through the mailbox and signal in `channels`.

pub mod editor;
pub mod scan;

pub use editor::{editor_task, TerminalEditor};
pub use scan::{scan_task, Scanner};
