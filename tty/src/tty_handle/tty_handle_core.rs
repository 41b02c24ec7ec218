// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words NOCTTY CLOEXEC RDONLY setsid errno

//! The shared terminal descriptor.
//!
//! [`TtyHandle`] is the explicit context object that [`ModeController`] and
//! [`TimedReader`] borrow. It opens its device at most once, on first use, and caches
//! the *outcome*: a failed open is remembered too, and every later operation reports
//! it as [`TtyError::Open`] instead of retrying.
//!
//! The controlling terminal is opened from `/dev/tty`, not taken from stdin, so the
//! layer keeps working when stdin and stdout are redirected:
//!
//! ```bash
//! echo "data" | ttyctl read --timeout-us 1000000
//! ```
//!
//! [`ModeController`]: crate::ModeController
//! [`TimedReader`]: crate::TimedReader

use crate::{ModeController, TimedReader, TtyError};
use rustix::{fd::{AsFd, BorrowedFd, OwnedFd},
             fs::{self, Mode, OFlags},
             io::Errno};
use std::{path::{Path, PathBuf},
          sync::{LazyLock, OnceLock}};

/// Path of the process's controlling terminal, independent of stdin/stdout redirection.
pub const DEV_TTY_PATH: &str = "/dev/tty";

/// The process-wide handle to the controlling terminal.
/// Using [`std::sync::LazyLock`] (stabilized in Rust 1.80) instead of `once_cell`.
static GLOBAL_TTY: LazyLock<TtyHandle> = LazyLock::new(TtyHandle::controlling);

/// A lazily opened terminal descriptor, shared by reference.
///
/// The open happens inside [`OnceLock::get_or_init`], so concurrent first use from
/// several threads still opens the device exactly once. After that the handle is
/// read-only. It is never closed explicitly; the descriptor lives as long as the
/// handle (for [`TtyHandle::global()`], the rest of the process).
#[derive(Debug)]
pub struct TtyHandle {
    /// `None` for handles built with [`TtyHandle::from_fd()`].
    device_path: Option<PathBuf>,
    fd: OnceLock<Result<OwnedFd, Errno>>,
}

impl TtyHandle {
    /// A handle to the controlling terminal ([`DEV_TTY_PATH`]). Nothing is opened yet.
    #[must_use]
    pub fn controlling() -> Self { Self::with_device_path(DEV_TTY_PATH) }

    /// A handle to an arbitrary terminal device, e.g. a pty's controlled side. Nothing
    /// is opened yet.
    #[must_use]
    pub fn with_device_path(path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: Some(path.into()),
            fd: OnceLock::new(),
        }
    }

    /// A handle wrapping a descriptor that is already open. The handle takes ownership
    /// and closes it when dropped.
    #[must_use]
    pub fn from_fd(fd: OwnedFd) -> Self {
        Self {
            device_path: None,
            fd: OnceLock::from(Ok(fd)),
        }
    }

    /// The process-wide handle to the controlling terminal. All callers observe the
    /// same handle, so at most one `/dev/tty` descriptor is ever opened through it.
    #[must_use]
    pub fn global() -> &'static TtyHandle { &GLOBAL_TTY }

    #[must_use]
    pub fn device_path(&self) -> Option<&Path> { self.device_path.as_deref() }

    /// Whether the open has already been attempted (successfully or not). Does not
    /// trigger it.
    #[must_use]
    pub fn is_open_attempted(&self) -> bool { self.fd.get().is_some() }

    /// Borrow the descriptor, opening the device on first call.
    ///
    /// # Errors
    ///
    /// Returns [`TtyError::Open`] if the device could not be opened. The failure is
    /// cached, so every subsequent call returns the same error without reopening.
    pub fn fd(&self) -> Result<BorrowedFd<'_>, TtyError> {
        let outcome = self.fd.get_or_init(|| match &self.device_path {
            Some(path) => open_device(path),
            None => Err(Errno::BADF),
        });

        match outcome {
            Ok(fd) => Ok(fd.as_fd()),
            Err(errno) => Err(TtyError::Open {
                path: self.device_path.clone().unwrap_or_default(),
                source: *errno,
            }),
        }
    }

    /// The mode controller operating on this handle.
    #[must_use]
    pub fn mode_controller(&self) -> ModeController<'_> { ModeController::new(self) }

    /// The timed reader operating on this handle.
    #[must_use]
    pub fn timed_reader(&self) -> TimedReader<'_> { TimedReader::new(self) }
}

/// Open `path` for reading only. `O_NOCTTY` keeps the open from making the device the
/// controlling terminal of a session leader that doesn't have one yet.
fn open_device(path: &Path) -> Result<OwnedFd, Errno> {
    let flags = OFlags::RDONLY | OFlags::NOCTTY | OFlags::CLOEXEC;
    match fs::open(path, flags, Mode::empty()) {
        Ok(fd) => {
            tracing::debug!(message = "terminal device opened", path = %path.display());
            Ok(fd)
        }
        Err(errno) => {
            // % is Display, ? is Debug.
            tracing::warn!(
                message = "terminal device could not be opened",
                path = %path.display(),
                error = %errno
            );
            Err(errno)
        }
    }
}
