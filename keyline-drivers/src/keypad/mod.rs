//! Keypad scanning

pub mod matrix;

pub use matrix::{MatrixScanner, ScanConfig};
