// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! PTY based tests against a real controlling terminal (`/dev/tty`).
//!
//! Each test re-runs the test binary as a child whose controlling terminal is a pty,
//! see [`generate_pty_test!`]. The child reports one fact per line on stdout; the
//! controller waits for the lines it expects.
//!
//! Run with: `cargo test -p r3bl_tty --lib integration_tests -- --nocapture`
//!
//! [`generate_pty_test!`]: crate::generate_pty_test

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

mod test_controlling_tty_attributes;
mod test_controlling_tty_input;

use std::{io::{BufRead, Write},
          time::{Duration, Instant}};

/// How long the controller waits for any single expected line.
const LINE_DEADLINE: Duration = Duration::from_secs(10);

/// Read lines until one contains `needle`, and return it. Panics on a `FAILED:` line,
/// on EOF, or when [`LINE_DEADLINE`] passes.
fn read_line_containing(reader: &mut impl BufRead, needle: &str) -> String {
    let start = Instant::now();
    while start.elapsed() < LINE_DEADLINE {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => panic!("EOF before controlled process reported {needle:?}"),
            Ok(_) => {
                let trimmed = line.trim();
                eprintln!("  ← Controlled output: {trimmed}");
                assert!(!trimmed.contains("FAILED:"), "Test failed: {trimmed}");
                if trimmed.contains(needle) {
                    return trimmed.to_string();
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("Read error: {e}"),
        }
    }
    panic!("Timed out waiting for {needle:?}");
}

/// Report a line from the controlled process.
fn report(line: &str) {
    println!("{line}");
    std::io::stdout().flush().expect("Failed to flush");
}

/// Report a failure from the controlled process and exit it.
fn fail(reason: &str) -> ! {
    report(&format!("FAILED: {reason}"));
    std::process::exit(1);
}
