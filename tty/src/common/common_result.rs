// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Result type for application level code (the `ttyctl` binary, logging setup, test
/// fixtures), where any error is turned into a [`miette::Report`] for display.
///
/// Library operations on the terminal return [`TtyError`] instead, so callers can
/// branch on the failure category.
///
/// [`TtyError`]: crate::TtyError
pub type CommonResult<T> = miette::Result<T>;
