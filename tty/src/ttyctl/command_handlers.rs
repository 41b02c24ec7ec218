// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CommonResult, ReadOutcome, TerminalMode, TimedReader, TtyError, TtyHandle,
            ok,
            ttyctl::{CLIArg, CLICommand}};
use miette::IntoDiagnostic;
use std::{io::Write, time::Duration};

/// Ends `raw-echo`.
pub const QUIT_KEY: u8 = b'q';

/// Run `cli_arg`'s command against `tty`, writing the report to `out`.
///
/// Commands that change modes only for their own duration (`read`, `raw-echo`,
/// `password`) put the terminal attributes back before returning, even on error.
///
/// # Errors
///
/// Returns an error if a terminal operation fails (see [`crate::TtyError`]) or `out`
/// can't be written to.
pub fn handle_ttyctl_command(
    cli_arg: &CLIArg,
    tty: &TtyHandle,
    out: &mut impl Write,
) -> CommonResult<()> {
    match &cli_arg.command {
        CLICommand::Echo { state } => handle_echo(tty, (*state).into(), out),
        CLICommand::Mode { mode } => handle_mode(tty, (*mode).into(), out),
        CLICommand::Size => handle_size(tty, out),
        CLICommand::Read { mode, .. } => {
            handle_read(tty, (*mode).into(), cli_arg.command.read_timeout(), out)
        }
        CLICommand::RawEcho => handle_raw_echo(tty, out),
        CLICommand::Password => handle_password(tty, out),
        CLICommand::Snapshot => handle_snapshot(tty, out),
    }
}

fn handle_echo(tty: &TtyHandle, enabled: bool, out: &mut impl Write) -> CommonResult<()> {
    let modes = tty.mode_controller();
    modes.set_echo(enabled)?;
    writeln!(out, "echo: {}", on_off(modes.is_echo_enabled()?)).into_diagnostic()
}

fn handle_mode(
    tty: &TtyHandle,
    mode: TerminalMode,
    out: &mut impl Write,
) -> CommonResult<()> {
    let modes = tty.mode_controller();
    modes.set_mode(mode)?;
    writeln!(out, "mode: {}", describe_mode(modes.current_mode()?)).into_diagnostic()
}

fn handle_size(tty: &TtyHandle, out: &mut impl Write) -> CommonResult<()> {
    let size = tty.mode_controller().get_size()?;
    writeln!(out, "{} {}", size.columns, size.rows).into_diagnostic()
}

fn handle_read(
    tty: &TtyHandle,
    mode: TerminalMode,
    timeout: Option<Duration>,
    out: &mut impl Write,
) -> CommonResult<()> {
    let modes = tty.mode_controller();
    let reader = tty.timed_reader();

    let outcome = modes.preserve(|| -> Result<ReadOutcome, TtyError> {
        modes.set_mode(mode)?;
        reader.read_byte(timeout)
    })??;

    writeln!(out, "{}", describe_outcome(outcome)).into_diagnostic()
}

fn handle_raw_echo(tty: &TtyHandle, out: &mut impl Write) -> CommonResult<()> {
    writeln!(out, "In raw mode ({} to exit):", char::from(QUIT_KEY)).into_diagnostic()?;
    out.flush().into_diagnostic()?;

    let modes = tty.mode_controller();
    let reader = tty.timed_reader();

    let echoed = modes.preserve(|| -> CommonResult<usize> {
        modes.set_raw()?;
        // The terminal would echo too, and every byte would show up twice.
        modes.set_echo(false)?;
        echo_until_quit(reader, out)
    })??;

    // % is Display, ? is Debug.
    tracing::debug!(message = "raw echo finished", echoed = %echoed);
    writeln!(out).into_diagnostic()
}

fn handle_password(tty: &TtyHandle, out: &mut impl Write) -> CommonResult<()> {
    write!(out, "Enter password: ").into_diagnostic()?;
    out.flush().into_diagnostic()?;

    let modes = tty.mode_controller();
    let reader = tty.timed_reader();

    let password = modes.preserve(|| -> CommonResult<Vec<u8>> {
        modes.set_echo(false)?;
        read_line(reader)
    })??;

    writeln!(out, "\nPassword length: {}", password.len()).into_diagnostic()
}

fn handle_snapshot(tty: &TtyHandle, out: &mut impl Write) -> CommonResult<()> {
    let attributes = tty.mode_controller().snapshot()?;
    writeln!(out, "mode: {}", describe_mode(attributes.mode())).into_diagnostic()?;
    writeln!(out, "echo: {}", on_off(attributes.is_echo_enabled())).into_diagnostic()
}

/// Copy bytes to `out` until [`QUIT_KEY`] or the end of input. Returns how many were
/// copied.
fn echo_until_quit(reader: TimedReader<'_>, out: &mut impl Write) -> CommonResult<usize> {
    let mut count = 0;
    loop {
        match reader.read_byte(None)? {
            ReadOutcome::Byte(QUIT_KEY) | ReadOutcome::EndOfInput => break,
            ReadOutcome::Byte(byte) => {
                out.write_all(&[byte]).into_diagnostic()?;
                out.flush().into_diagnostic()?;
                count += 1;
            }
            ReadOutcome::TimedOut => {}
        }
    }
    Ok(count)
}

/// Bytes up to (not including) the line terminator.
fn read_line(reader: TimedReader<'_>) -> CommonResult<Vec<u8>> {
    let mut line = vec![];
    loop {
        match reader.read_byte(None)? {
            ReadOutcome::Byte(b'\n' | b'\r') | ReadOutcome::EndOfInput => break,
            ReadOutcome::Byte(byte) => line.push(byte),
            ReadOutcome::TimedOut => {}
        }
    }
    ok!(line)
}

fn describe_mode(mode: Option<TerminalMode>) -> String {
    mode.map_or_else(|| "unclassified".to_string(), |mode| mode.to_string())
}

fn describe_outcome(outcome: ReadOutcome) -> String {
    let code = outcome.into_legacy_code();
    match outcome {
        ReadOutcome::Byte(byte) => format!("byte: 0x{byte:02x} (code {code})"),
        ReadOutcome::TimedOut => format!("timed out (code {code})"),
        ReadOutcome::EndOfInput => format!("end of input (code {code})"),
    }
}

fn on_off(enabled: bool) -> &'static str { if enabled { "on" } else { "off" } }
