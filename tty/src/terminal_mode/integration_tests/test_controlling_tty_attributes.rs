// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The global handle opens the session's `/dev/tty`, sees its window size, and
//! [`ModeController::preserve()`] puts its attributes back.
//!
//! [`ModeController::preserve()`]: crate::ModeController::preserve

use super::{fail, read_line_containing, report};
use crate::{TerminalMode, TtyError, TtyHandle, generate_pty_test, test_fixtures::ControlledChild};
use std::io::BufReader;

generate_pty_test! {
    /// Child opens `/dev/tty`, reports its size (the pty is 80x24), switches to raw
    /// with echo off inside `preserve()`, and checks the attributes afterwards.
    test_fn: test_controlling_tty_attributes,
    controller: pty_controller_entry_point,
    controlled: pty_controlled_entry_point
}

fn pty_controller_entry_point(pty_pair: portable_pty::PtyPair, mut child: ControlledChild) {
    let reader = pty_pair.master.try_clone_reader().expect("Failed to get reader");
    let mut buf_reader = BufReader::new(reader);

    let line = read_line_containing(&mut buf_reader, "SIZE:");
    assert!(line.contains("SIZE: 80 24"), "Unexpected size report: {line}");
    read_line_containing(&mut buf_reader, "MODE_IN_BODY: raw");
    read_line_containing(&mut buf_reader, "SUCCESS");

    let status = child.wait().expect("Failed to wait for controlled process");
    assert!(status.success(), "Controlled process exited with {status:?}");
}

fn pty_controlled_entry_point() -> ! {
    let tty = TtyHandle::global();
    let modes = tty.mode_controller();

    match modes.get_size() {
        Ok(size) => report(&format!("SIZE: {} {}", size.columns, size.rows)),
        Err(e) => fail(&e.to_string()),
    }

    let before = modes.snapshot().unwrap_or_else(|e| fail(&e.to_string()));

    let in_body = modes.preserve(|| -> Result<Option<TerminalMode>, TtyError> {
        modes.set_raw()?;
        modes.set_echo(false)?;
        modes.current_mode()
    });
    match in_body {
        Ok(Ok(Some(TerminalMode::Raw))) => report("MODE_IN_BODY: raw"),
        Ok(Ok(other)) => fail(&format!("mode in body was {other:?}")),
        Ok(Err(e)) | Err(e) => fail(&e.to_string()),
    }

    let after = modes.snapshot().unwrap_or_else(|e| fail(&e.to_string()));
    if after != before {
        fail("attributes not restored");
    }
    if !tty.is_open_attempted() {
        fail("global handle was never opened");
    }

    report("SUCCESS");
    std::process::exit(0);
}
