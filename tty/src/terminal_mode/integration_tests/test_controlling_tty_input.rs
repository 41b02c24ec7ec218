// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keystrokes typed into the controlling terminal reach [`TimedReader`] byte by byte
//! in cbreak and raw mode, and Ctrl+C arrives as a byte in raw mode.
//!
//! [`TimedReader`]: crate::TimedReader

use super::{fail, read_line_containing, report};
use crate::{ReadOutcome, TtyHandle, generate_pty_test,
            test_fixtures::ControlledChild};
use std::{io::{BufReader, Write},
          time::Duration};

const CONTROL_C: u8 = 0x03;

generate_pty_test! {
    /// Controller types `a` (cbreak, no Enter) and then Ctrl+C (raw), and expects the
    /// child to report both bytes, followed by a timeout when nothing more is typed.
    test_fn: test_controlling_tty_input,
    controller: pty_controller_entry_point,
    controlled: pty_controlled_entry_point
}

fn pty_controller_entry_point(pty_pair: portable_pty::PtyPair, mut child: ControlledChild) {
    let mut writer = pty_pair.master.take_writer().expect("Failed to get writer");
    let reader = pty_pair.master.try_clone_reader().expect("Failed to get reader");
    let mut buf_reader = BufReader::new(reader);

    read_line_containing(&mut buf_reader, "CBREAK_READY");
    writer.write_all(b"a").expect("Failed to write 'a'");
    writer.flush().expect("Failed to flush");
    read_line_containing(&mut buf_reader, "RECEIVED: 0x61");

    read_line_containing(&mut buf_reader, "RAW_READY");
    writer.write_all(&[CONTROL_C]).expect("Failed to write Ctrl+C");
    writer.flush().expect("Failed to flush");
    read_line_containing(&mut buf_reader, "RECEIVED: 0x03");

    read_line_containing(&mut buf_reader, "TIMED_OUT");
    read_line_containing(&mut buf_reader, "SUCCESS");

    drop(writer);
    let status = child.wait().expect("Failed to wait for controlled process");
    assert!(status.success(), "Controlled process exited with {status:?}");
}

fn pty_controlled_entry_point() -> ! {
    let tty = TtyHandle::global();
    let modes = tty.mode_controller();
    let reader = tty.timed_reader();

    let original = modes.snapshot().unwrap_or_else(|e| fail(&e.to_string()));

    let report_outcome = |outcome: ReadOutcome| match outcome {
        ReadOutcome::Byte(byte) => report(&format!("RECEIVED: 0x{byte:02x}")),
        ReadOutcome::TimedOut => report("TIMED_OUT"),
        ReadOutcome::EndOfInput => report("END_OF_INPUT"),
    };

    if let Err(e) = modes.set_echo(false).and_then(|()| modes.set_cbreak()) {
        fail(&e.to_string());
    }
    report("CBREAK_READY");
    match reader.read_byte(Some(Duration::from_secs(5))) {
        Ok(outcome) => report_outcome(outcome),
        Err(e) => fail(&e.to_string()),
    }

    if let Err(e) = modes.set_raw() {
        fail(&e.to_string());
    }
    report("RAW_READY");
    match reader.read_byte(None) {
        Ok(outcome) => report_outcome(outcome),
        Err(e) => fail(&e.to_string()),
    }

    match reader.read_byte(Some(Duration::from_millis(200))) {
        Ok(outcome) => report_outcome(outcome),
        Err(e) => fail(&e.to_string()),
    }

    if let Err(e) = modes.restore(Some(&original)) {
        fail(&e.to_string());
    }
    report("SUCCESS");
    std::process::exit(0);
}
