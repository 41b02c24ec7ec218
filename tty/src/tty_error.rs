// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words tcgetattr tcsetattr tcgetwinsize errno

//! Errors returned by the terminal control layer.
//!
//! Every failure is returned to the immediate caller as a value. Nothing here retries,
//! and nothing here is fatal to the process; the calling application decides whether
//! to abort.

use rustix::io::Errno;
use std::{io, path::PathBuf};

/// Portable category of a [`TtyError`], so calling code can branch without depending
/// on OS specific numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TtyErrorCategory {
    /// The terminal device could not be opened.
    Open,
    /// `tcgetattr` failed.
    AttributeQuery,
    /// `tcsetattr` failed.
    AttributeApply,
    /// `tcgetwinsize` failed.
    SizeQuery,
    /// Waiting for the terminal to become readable failed.
    ReadinessWait,
    /// The single byte `read` failed.
    Read,
}

/// Error type for all [`ModeController`] and [`TimedReader`] operations.
///
/// The underlying OS error code is passed through unmodified, see
/// [`TtyError::raw_os_error()`].
///
/// [`ModeController`]: crate::ModeController
/// [`TimedReader`]: crate::TimedReader
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TtyError {
    /// The terminal device could not be opened. The failure is cached by the
    /// [`TtyHandle`] and reported again at every point of use.
    ///
    /// [`TtyHandle`]: crate::TtyHandle
    #[error("failed to open terminal device {path}: {source}")]
    #[diagnostic(
        code(r3bl_tty::open),
        help(
            "The process may not have a controlling terminal (e.g. it was started \
             by a daemon, a CI runner, or with `setsid`)."
        )
    )]
    Open {
        /// The device that was opened.
        path: PathBuf,
        /// The errno returned by `open`.
        #[source]
        source: Errno,
    },

    /// Terminal attributes could not be retrieved.
    #[error("failed to retrieve terminal attributes: {source}")]
    #[diagnostic(
        code(r3bl_tty::attribute_query),
        help("`ENOTTY` means the descriptor is not a terminal.")
    )]
    AttributeQuery {
        /// The errno returned by `tcgetattr`.
        #[source]
        source: Errno,
    },

    /// Terminal attributes could not be applied.
    #[error("failed to set terminal attributes: {source}")]
    #[diagnostic(code(r3bl_tty::attribute_apply))]
    AttributeApply {
        /// The errno returned by `tcsetattr`.
        #[source]
        source: Errno,
    },

    /// Window size could not be retrieved.
    #[error("failed to retrieve terminal window size: {source}")]
    #[diagnostic(code(r3bl_tty::size_query))]
    SizeQuery {
        /// The errno returned by `tcgetwinsize`.
        #[source]
        source: Errno,
    },

    /// Waiting for the terminal to become readable failed. This includes being
    /// interrupted by a signal (`EINTR`).
    #[error("failed to wait for terminal input: {source}")]
    #[diagnostic(code(r3bl_tty::readiness_wait))]
    ReadinessWait {
        /// The error reported by the poller.
        #[source]
        source: io::Error,
    },

    /// Reading a byte from the terminal failed.
    #[error("failed to read from terminal: {source}")]
    #[diagnostic(code(r3bl_tty::read))]
    Read {
        /// The errno returned by `read`.
        #[source]
        source: Errno,
    },
}

impl TtyError {
    #[must_use]
    pub fn category(&self) -> TtyErrorCategory {
        match self {
            TtyError::Open { .. } => TtyErrorCategory::Open,
            TtyError::AttributeQuery { .. } => TtyErrorCategory::AttributeQuery,
            TtyError::AttributeApply { .. } => TtyErrorCategory::AttributeApply,
            TtyError::SizeQuery { .. } => TtyErrorCategory::SizeQuery,
            TtyError::ReadinessWait { .. } => TtyErrorCategory::ReadinessWait,
            TtyError::Read { .. } => TtyErrorCategory::Read,
        }
    }

    /// The raw OS error code behind this error, unmodified.
    ///
    /// Only [`TtyError::ReadinessWait`] can come without one, when the poller fails
    /// for a reason that isn't an OS error.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            TtyError::Open { source, .. }
            | TtyError::AttributeQuery { source }
            | TtyError::AttributeApply { source }
            | TtyError::SizeQuery { source }
            | TtyError::Read { source } => Some(source.raw_os_error()),
            TtyError::ReadinessWait { source } => source.raw_os_error(),
        }
    }
}
