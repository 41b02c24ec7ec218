// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CommonResult, TtyHandle, ok};
use miette::IntoDiagnostic;
use rustix::{fd::OwnedFd, io, pipe};

/// An anonymous pipe. The read end stands in for a terminal that is not a terminal:
/// reads and readiness work, attribute queries fail with `ENOTTY`.
#[derive(Debug)]
pub struct PipePair {
    reader: OwnedFd,
    writer: OwnedFd,
}

impl PipePair {
    /// # Errors
    ///
    /// Returns an error if the pipe can't be created.
    pub fn try_new() -> CommonResult<Self> {
        let (reader, writer) = pipe::pipe().into_diagnostic()?;
        ok!(Self { reader, writer })
    }

    /// A fresh [`TtyHandle`] on a duplicate of the read end.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor can't be duplicated.
    pub fn reader_handle(&self) -> CommonResult<TtyHandle> {
        let fd = io::dup(&self.reader).into_diagnostic()?;
        ok!(TtyHandle::from_fd(fd))
    }

    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn write(&self, mut bytes: &[u8]) -> CommonResult<()> {
        while !bytes.is_empty() {
            let written = io::write(&self.writer, bytes).into_diagnostic()?;
            bytes = &bytes[written..];
        }
        ok!()
    }

    /// Split into `(reader, writer)`, e.g. to close the writer and observe end of input.
    #[must_use]
    pub fn into_fds(self) -> (OwnedFd, OwnedFd) { (self.reader, self.writer) }
}
