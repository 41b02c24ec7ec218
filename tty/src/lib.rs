// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios cbreak tcgetattr tcsetattr tcgetwinsize epoll

//! # `r3bl_tty`
//!
//! A minimal control layer for the process's **controlling terminal**. It is the
//! substrate a line editor or REPL sits on top of, and it does exactly three things:
//!
//! | Component               | What it does                                                         |
//! | :---------------------- | :------------------------------------------------------------------- |
//! | [`TtyHandle`]           | Lazily opens `/dev/tty` once, caches the outcome for the process     |
//! | [`ModeController`]      | Cooked / cbreak / raw modes, echo, attribute snapshot, window size   |
//! | [`TimedReader`]         | Reads one byte, blocking or bounded by a timeout                     |
//!
//! Both components borrow the same [`TtyHandle`]; they don't otherwise interact.
//!
//! ```text
//! ┌───────────────────┐      ┌────────────────────┐
//! │ ModeController    │      │ TimedReader        │
//! │ tcgetattr         │      │ epoll via mio, or  │
//! │ tcsetattr (Now)   │      │ select(2); read(1) │
//! │ tcgetwinsize      │      │                    │
//! └─────────┬─────────┘      └─────────┬──────────┘
//!           │      &TtyHandle          │
//!           └────────────┬─────────────┘
//!                        ▼
//!             ┌─────────────────────┐
//!             │ TtyHandle           │
//!             │ OnceLock<Result<    │
//!             │   OwnedFd, Errno>>  │
//!             └─────────────────────┘
//! ```
//!
//! ## Modes
//!
//! | Mode                    | Line buffered | Ctrl+C / Ctrl+\ signals | Flow control, break |
//! | :---------------------- | :------------ | :---------------------- | :------------------ |
//! | [`TerminalMode::Cooked`] | yes          | yes                     | yes                 |
//! | [`TerminalMode::CBreak`] | no           | yes                     | yes                 |
//! | [`TerminalMode::Raw`]    | no           | no                      | no                  |
//!
//! Echo is a separate switch ([`ModeController::set_echo`]) and is never touched by a
//! mode change.
//!
//! ## Usage
//!
//! ```no_run
//! use r3bl_tty::{ReadOutcome, TtyHandle};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), r3bl_tty::TtyError> {
//! let tty = TtyHandle::global();
//! let modes = tty.mode_controller();
//!
//! let outcome = modes.preserve(|| {
//!     modes.set_cbreak()?;
//!     modes.set_echo(false)?;
//!     tty.timed_reader().read_byte(Some(Duration::from_micros(500_000)))
//! })??;
//!
//! match outcome {
//!     ReadOutcome::Byte(byte) => println!("got 0x{byte:02x}"),
//!     ReadOutcome::TimedOut => println!("nothing typed"),
//!     ReadOutcome::EndOfInput => println!("terminal closed"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`TtyHandle`]: crate::TtyHandle
//! [`ModeController`]: crate::ModeController
//! [`TimedReader`]: crate::TimedReader

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod common;
pub mod log;

#[cfg(unix)]
pub mod terminal_mode;
#[cfg(unix)]
pub mod timed_read;
#[cfg(unix)]
pub mod tty_error;
#[cfg(unix)]
pub mod tty_handle;
#[cfg(unix)]
pub mod ttyctl;

#[cfg(all(unix, test))]
pub mod test_fixtures;

// Re-export stable public API.
pub use common::*;
pub use log::*;

#[cfg(unix)]
pub use terminal_mode::*;
#[cfg(unix)]
pub use timed_read::*;
#[cfg(unix)]
pub use tty_error::*;
#[cfg(unix)]
pub use tty_handle::*;
