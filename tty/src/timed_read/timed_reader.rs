// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words kqueue epoll EINTR cbreak nfds EINVAL

use crate::{ReadOutcome, TtyError, TtyHandle};
use rustix::{fd::{AsRawFd, BorrowedFd},
             io};
use std::time::Duration;

/// Reads one byte at a time from the terminal, optionally bounded by a timeout.
///
/// | `timeout`              | Behavior                                                    |
/// | :--------------------- | :---------------------------------------------------------- |
/// | `None`                 | Block until a byte arrives or the input ends                |
/// | `Some(Duration::ZERO)` | Poll once without blocking, read if something is pending    |
/// | `Some(t)`              | Wait up to `t` for input, then read if something is pending |
///
/// The call blocks for at most the timeout plus one `read`. There is no other way to
/// cancel it.
///
/// How the readiness wait is done depends on the platform:
///
/// | Platform        | Readiness wait                                  |
/// | :-------------- | :---------------------------------------------- |
/// | Linux           | [`mio::Poll`] (epoll), created for each call    |
/// | macOS, BSDs     | `select(2)` via [`rustix::event::select`]       |
///
/// On Linux, registering fresh means bytes already buffered from an earlier burst are
/// always reported, even though [`mio`] is edge triggered and every call consumes only
/// one byte. Elsewhere [`mio`] is kqueue based, and kqueue can't poll tty descriptors
/// (neither can macOS `poll(2)`), so `select(2)` is used instead.
#[derive(Debug, Clone, Copy)]
pub struct TimedReader<'h> {
    handle: &'h TtyHandle,
}

impl<'h> TimedReader<'h> {
    #[must_use]
    pub fn new(handle: &'h TtyHandle) -> Self { Self { handle } }

    /// Read a single byte. Timeouts in microseconds are expressed with
    /// [`Duration::from_micros()`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The handle could not be opened ([`TtyError::Open`])
    /// - The readiness wait failed, including being interrupted by a signal
    ///   ([`TtyError::ReadinessWait`])
    /// - The `read` syscall failed ([`TtyError::Read`])
    pub fn read_byte(&self, timeout: Option<Duration>) -> Result<ReadOutcome, TtyError> {
        let fd = self.handle.fd()?;

        if let Some(timeout) = timeout
            && !wait_until_readable(fd, timeout)?
        {
            tracing::trace!(message = "terminal read timed out", ?timeout);
            return Ok(ReadOutcome::TimedOut);
        }

        let outcome = read_one(fd)?;
        tracing::trace!(message = "terminal read", ?outcome);
        Ok(outcome)
    }
}

/// `true` if the descriptor reported any event (readable, hang up, error) before
/// `timeout` elapsed. A hang up or error is left for the following `read` to report.
#[cfg(target_os = "linux")]
fn wait_until_readable(fd: BorrowedFd<'_>, timeout: Duration) -> Result<bool, TtyError> {
    mio_wait_until_readable(fd, timeout)
}

/// See [`wait_until_readable`].
#[cfg(not(target_os = "linux"))]
fn wait_until_readable(fd: BorrowedFd<'_>, timeout: Duration) -> Result<bool, TtyError> {
    select_wait_until_readable(fd, timeout)
}

#[cfg(target_os = "linux")]
fn mio_wait_until_readable(
    fd: BorrowedFd<'_>,
    timeout: Duration,
) -> Result<bool, TtyError> {
    use mio::{Events, Interest, Poll, Token, unix::SourceFd};

    const TTY_TOKEN: Token = Token(0);

    let into_error = |source| TtyError::ReadinessWait { source };

    let mut poll = Poll::new().map_err(into_error)?;
    let raw_fd = fd.as_raw_fd();
    poll.registry()
        .register(&mut SourceFd(&raw_fd), TTY_TOKEN, Interest::READABLE)
        .map_err(into_error)?;

    let mut events = Events::with_capacity(1);
    poll.poll(&mut events, Some(timeout)).map_err(into_error)?;

    Ok(events.iter().any(|event| event.token() == TTY_TOKEN))
}

/// Larger timeouts are rejected by macOS `select(2)` with `EINVAL`.
#[cfg(any(not(target_os = "linux"), test))]
const SELECT_MAX_TIMEOUT: Duration = Duration::from_secs(100_000_000);

/// Built on Linux only for tests.
#[cfg(any(not(target_os = "linux"), test))]
fn select_wait_until_readable(
    fd: BorrowedFd<'_>,
    timeout: Duration,
) -> Result<bool, TtyError> {
    use rustix::event::{FdSetElement, Timespec, fd_set_insert, fd_set_num_elements,
                        select};

    let into_error = |errno: io::Errno| TtyError::ReadinessWait {
        source: errno.into(),
    };

    let timeout = Timespec::try_from(timeout.min(SELECT_MAX_TIMEOUT))
        .map_err(|_| into_error(io::Errno::INVAL))?;

    let raw_fd = fd.as_raw_fd();
    let nfds = raw_fd + 1;
    let mut read_set = vec![FdSetElement::default(); fd_set_num_elements(1, nfds)];
    fd_set_insert(&mut read_set, raw_fd);

    // SAFETY: the only fd in the set is borrowed from `fd`, so it stays open for the
    // whole call.
    let ready_count =
        unsafe { select(nfds, Some(&mut read_set), None, None, Some(&timeout)) }
            .map_err(into_error)?;

    Ok(ready_count > 0)
}

fn read_one(fd: BorrowedFd<'_>) -> Result<ReadOutcome, TtyError> {
    let mut buffer = [0_u8; 1];
    match io::read(fd, &mut buffer[..]) {
        Ok(0) => Ok(ReadOutcome::EndOfInput),
        Ok(_) => Ok(ReadOutcome::Byte(buffer[0])),
        Err(source) => Err(TtyError::Read { source }),
    }
}
