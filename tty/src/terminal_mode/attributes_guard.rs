// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ModeController, TerminalAttributes, TtyError};

/// RAII guard that puts the terminal attributes back when dropped.
///
/// Recommended way to change modes temporarily, as it restores the terminal even on
/// panic. A restore failure inside [`Drop`] can't be returned, so it is logged; call
/// [`AttributesGuard::restore_now()`] to observe it instead.
///
/// ```no_run
/// use r3bl_tty::{AttributesGuard, TtyHandle};
///
/// # fn main() -> Result<(), r3bl_tty::TtyError> {
/// let modes = TtyHandle::global().mode_controller();
/// {
///     let _guard = AttributesGuard::new(modes)?;
///     modes.set_raw()?;
///     modes.set_echo(false)?;
///     // ... read keystrokes ...
/// } // Original attributes restored here.
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AttributesGuard<'h> {
    modes: ModeController<'h>,
    /// `None` once restored.
    saved: Option<TerminalAttributes>,
}

impl<'h> AttributesGuard<'h> {
    /// Take a snapshot of the current attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be taken. See
    /// [`ModeController::snapshot()`].
    pub fn new(modes: ModeController<'h>) -> Result<Self, TtyError> {
        let saved = modes.snapshot()?;
        Ok(Self {
            modes,
            saved: Some(saved),
        })
    }

    #[must_use]
    pub fn saved(&self) -> Option<&TerminalAttributes> { self.saved.as_ref() }

    /// Restore now and disarm the guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the attributes cannot be applied. See
    /// [`ModeController::restore()`].
    pub fn restore_now(mut self) -> Result<(), TtyError> {
        let saved = self.saved.take();
        self.modes.restore(saved.as_ref())
    }
}

impl Drop for AttributesGuard<'_> {
    fn drop(&mut self) {
        let saved = self.saved.take();
        if let Err(error) = self.modes.restore(saved.as_ref()) {
            // % is Display, ? is Debug.
            tracing::warn!(message = "failed to restore terminal attributes", error = %error);
        }
    }
}
