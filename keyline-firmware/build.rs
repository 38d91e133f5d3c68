//! Build script for keyline-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates terminal.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use keyline_core::config::{parse_config, TerminalConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate terminal.toml at compile time
///
/// The file is checked twice: by the full `toml` parser for readable
/// syntax errors, then by the firmware's own parser so a file that only
/// `toml` understands is caught here rather than at boot.
fn validate_config() {
    println!("cargo:rerun-if-changed=terminal.toml");

    let config_path = Path::new("terminal.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: terminal.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds terminal.toml at build time.                ║\n\
            ║  Please create one in the keyline-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read terminal.toml                             ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: TerminalConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            fail("Invalid terminal.toml", &e.to_string());
        }
    };

    if let Err(e) = config.validate() {
        fail("Invalid terminal.toml values", &format!("{:?}", e));
    }

    match parse_config(&config_content) {
        Ok(parsed) if parsed == config => {}
        Ok(_) => fail(
            "terminal.toml parses differently on the target",
            "Use plain integers, 0x hex and true/false only",
        ),
        Err(e) => fail(
            "terminal.toml uses syntax the firmware cannot read",
            &format!("{:?}", e),
        ),
    }

    println!("cargo:warning=terminal.toml validated successfully");
}

fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        ║                                                                  ║\n\
        {}\n\
        ║                                                                  ║\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
