// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words openpt grantpt unlockpt ptsname NOCTTY CLOEXEC RDWR winsize tcsetwinsize

use crate::{CommonResult, TerminalSize, TtyHandle, ok};
use miette::IntoDiagnostic;
use rustix::{fd::OwnedFd,
             fs::{self, Mode, OFlags},
             io, pty,
             termios::{self, Winsize}};
use std::path::{Path, PathBuf};

/// A pseudo terminal pair opened inside the test process.
///
/// The controlled side behaves like any terminal device (it has a line discipline,
/// attributes, and a window size), but it is *not* the controlling terminal of the
/// test process, so tests can change its modes freely and run in parallel.
///
/// ```text
/// write() ──▶ controller fd ──▶ line discipline ──▶ controlled fd ──▶ TtyHandle
/// ```
#[derive(Debug)]
pub struct InProcessPty {
    controller: OwnedFd,
    controlled: OwnedFd,
    controlled_path: PathBuf,
}

impl InProcessPty {
    /// # Errors
    ///
    /// Returns an error if the pty can't be allocated or its controlled side opened.
    pub fn try_new() -> CommonResult<Self> {
        let controller =
            pty::openpt(pty::OpenptFlags::RDWR | pty::OpenptFlags::NOCTTY).into_diagnostic()?;
        pty::grantpt(&controller).into_diagnostic()?;
        pty::unlockpt(&controller).into_diagnostic()?;
        let name = pty::ptsname(&controller, Vec::new()).into_diagnostic()?;

        let controlled = fs::open(
            name.as_c_str(),
            OFlags::RDWR | OFlags::NOCTTY | OFlags::CLOEXEC,
            Mode::empty(),
        )
        .into_diagnostic()?;

        let controlled_path = PathBuf::from(name.to_string_lossy().into_owned());

        ok!(Self {
            controller,
            controlled,
            controlled_path,
        })
    }

    #[must_use]
    pub fn controlled_path(&self) -> &Path { &self.controlled_path }

    /// A fresh [`TtyHandle`] on a duplicate of the controlled side.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor can't be duplicated.
    pub fn controlled_handle(&self) -> CommonResult<TtyHandle> {
        let fd = io::dup(&self.controlled).into_diagnostic()?;
        ok!(TtyHandle::from_fd(fd))
    }

    /// Type `bytes` into the terminal, as if from a keyboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write(&self, mut bytes: &[u8]) -> CommonResult<()> {
        while !bytes.is_empty() {
            let written = io::write(&self.controller, bytes).into_diagnostic()?;
            bytes = &bytes[written..];
        }
        ok!()
    }

    /// Resize the terminal, as a terminal emulator does when its window changes.
    ///
    /// # Errors
    ///
    /// Returns an error if `tcsetwinsize` fails.
    pub fn set_window_size(&self, size: TerminalSize) -> CommonResult<()> {
        let winsize = Winsize {
            ws_row: size.rows,
            ws_col: size.columns,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        termios::tcsetwinsize(&self.controller, winsize).into_diagnostic()?;
        ok!()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controlled_side_is_a_terminal() {
        let pty = InProcessPty::try_new().unwrap();
        assert!(termios::isatty(&pty.controlled));
        assert!(pty.controlled_path().exists());
    }
}
