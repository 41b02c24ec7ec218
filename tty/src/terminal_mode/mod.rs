// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios cbreak ICANON IEXTEN IXON BRKINT tcgetattr tcsetattr stty

//! Terminal input modes, echo, attribute snapshots, and window size.
//!
//! ## Cooked, CBreak, and Raw
//!
//! Between the terminal and the program reading it sits the kernel's **line
//! discipline**. It buffers input line by line, turns Ctrl+C into `SIGINT`, handles
//! Ctrl+S / Ctrl+Q flow control, and echoes what you type. How much of that it does is
//! controlled by termios flags:
//!
//! | Mode       | `ICANON` | `ISIG` | `IEXTEN` | `IXON` | `BRKINT` | What the reader sees                       |
//! | :--------- | :------- | :----- | :------- | :----- | :------- | :----------------------------------------- |
//! | **Cooked** | on       | on     | on       | on     | on       | Whole lines, after Enter                   |
//! | **CBreak** | off      | on     | off      | on     | on       | Each byte, but Ctrl+C still kills you      |
//! | **Raw**    | off      | off    | off      | off    | off      | Each byte, Ctrl+C is just `0x03`           |
//!
//! Only those five flags change on a mode switch ([`FlagDelta`]); `ECHO` has its own
//! switch ([`ModeController::set_echo()`]). So `set_raw()` followed by `set_raw()` is the
//! same as one call, and echo survives any mode change.
//!
//! Unlike `cfmakeraw`, raw mode here does not touch output processing (`OPOST`),
//! character size, `ICRNL`, or `VMIN` / `VTIME`.
//!
//! ## The `stty` Command
//!
//! `stty` manipulates the same termios settings from the shell, which is handy when
//! debugging:
//!
//! ```bash
//! stty -a                 # Inspect everything.
//! stty -icanon -iexten    # Roughly `set_cbreak()`.
//! stty -echo              # `set_echo(false)`.
//! saved=$(stty -g)        # `snapshot()` ...
//! stty "$saved"           # ... and `restore()`.
//! stty size               # `get_size()`, but prints rows first.
//! ```
//!
//! ## Usage
//!
//! Prefer [`ModeController::preserve()`] or an [`AttributesGuard`] over paired manual
//! calls, so the terminal is put back even if the code in between fails:
//!
//! ```no_run
//! use r3bl_tty::TtyHandle;
//!
//! # fn main() -> Result<(), r3bl_tty::TtyError> {
//! let modes = TtyHandle::global().mode_controller();
//! modes.preserve(|| -> Result<(), r3bl_tty::TtyError> {
//!     modes.set_cbreak()?;
//!     modes.set_echo(false)?;
//!     // ... prompt for a password, one byte at a time ...
//!     Ok(())
//! })??;
//! # Ok(())
//! # }
//! ```

// Private modules (hide internal structure).
mod attributes_guard;
mod flag_delta;
mod mode_controller;
mod terminal_attributes;

// Re-export the public API (flat, ergonomic surface).
pub use attributes_guard::*;
pub use flag_delta::*;
pub use mode_controller::*;
pub use terminal_attributes::*;

// PTY based tests against a real controlling terminal.
#[cfg(test)]
mod integration_tests;
