// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words tcgetattr tcsetattr tcgetwinsize termios cbreak

use crate::{AttributesGuard, FlagDelta, TerminalAttributes, TerminalMode, TerminalSize,
            TtyError, TtyHandle};
use rustix::termios::{self, OptionalActions, Termios};

/// Switches the terminal between cooked, cbreak, and raw input, toggles echo, and
/// captures / restores the full attribute set.
///
/// Every mutation follows the same three steps:
/// 1. `tcgetattr` the current attributes ([`TtyError::AttributeQuery`] on failure).
/// 2. Change only the flags the operation documents.
/// 3. `tcsetattr` with [`OptionalActions::Now`] ([`TtyError::AttributeApply`] on
///    failure). The change is immediate, not deferred until output drains.
///
/// See [module documentation] for the flag table.
///
/// [module documentation]: mod@crate::terminal_mode
#[derive(Debug, Clone, Copy)]
pub struct ModeController<'h> {
    handle: &'h TtyHandle,
}

impl<'h> ModeController<'h> {
    #[must_use]
    pub fn new(handle: &'h TtyHandle) -> Self { Self { handle } }

    #[must_use]
    pub fn handle(&self) -> &'h TtyHandle { self.handle }

    /// Line buffered input; interrupt / quit keys, extended processing, flow control,
    /// and break signals on.
    ///
    /// # Errors
    ///
    /// See [`ModeController::set_mode()`].
    pub fn set_cooked(&self) -> Result<(), TtyError> { self.set_mode(TerminalMode::Cooked) }

    /// Byte at a time input; interrupt / quit keys still generate signals.
    ///
    /// # Errors
    ///
    /// See [`ModeController::set_mode()`].
    pub fn set_cbreak(&self) -> Result<(), TtyError> { self.set_mode(TerminalMode::CBreak) }

    /// Byte at a time input with no special character interpretation. Ctrl+C arrives
    /// as byte `0x03` instead of raising `SIGINT`.
    ///
    /// # Errors
    ///
    /// See [`ModeController::set_mode()`].
    pub fn set_raw(&self) -> Result<(), TtyError> { self.set_mode(TerminalMode::Raw) }

    /// Apply the flag delta of `mode`. Calling this twice with the same mode leaves the
    /// attributes exactly as calling it once. Echo is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The handle could not be opened ([`TtyError::Open`])
    /// - Terminal attributes cannot be retrieved ([`TtyError::AttributeQuery`])
    /// - Terminal attributes cannot be set ([`TtyError::AttributeApply`])
    pub fn set_mode(&self, mode: TerminalMode) -> Result<(), TtyError> {
        self.update_attributes(mode.flag_delta())?;
        tracing::debug!(message = "terminal mode set", mode = %mode);
        Ok(())
    }

    /// Turn echo of typed characters on or off. The mode is left untouched.
    ///
    /// # Errors
    ///
    /// See [`ModeController::set_mode()`].
    pub fn set_echo(&self, enabled: bool) -> Result<(), TtyError> {
        self.update_attributes(FlagDelta::echo(enabled))?;
        tracing::debug!(message = "terminal echo set", enabled);
        Ok(())
    }

    /// Capture the full attribute state.
    ///
    /// # Errors
    ///
    /// Returns [`TtyError::Open`] or [`TtyError::AttributeQuery`].
    pub fn snapshot(&self) -> Result<TerminalAttributes, TtyError> {
        self.query().map(TerminalAttributes::from)
    }

    /// Apply a previously captured snapshot verbatim. `None` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TtyError::Open`] or [`TtyError::AttributeApply`].
    pub fn restore(&self, snapshot: Option<&TerminalAttributes>) -> Result<(), TtyError> {
        let Some(attributes) = snapshot else {
            return Ok(());
        };
        self.apply(attributes.termios())?;
        tracing::debug!(message = "terminal attributes restored", mode = ?attributes.mode());
        Ok(())
    }

    /// Query the current window dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`TtyError::Open`] or [`TtyError::SizeQuery`].
    pub fn get_size(&self) -> Result<TerminalSize, TtyError> {
        let fd = self.handle.fd()?;
        let winsize =
            termios::tcgetwinsize(fd).map_err(|source| TtyError::SizeQuery { source })?;
        Ok(TerminalSize {
            columns: winsize.ws_col,
            rows: winsize.ws_row,
        })
    }

    /// The mode the live attributes are in, or `None` if they match none of the three.
    ///
    /// # Errors
    ///
    /// Returns [`TtyError::Open`] or [`TtyError::AttributeQuery`].
    pub fn current_mode(&self) -> Result<Option<TerminalMode>, TtyError> {
        self.snapshot().map(|it| it.mode())
    }

    /// # Errors
    ///
    /// Returns [`TtyError::Open`] or [`TtyError::AttributeQuery`].
    pub fn is_echo_enabled(&self) -> Result<bool, TtyError> {
        self.snapshot().map(|it| it.is_echo_enabled())
    }

    /// Run `body`, then put the attributes back exactly as they were before it ran.
    /// The restore also happens if `body` panics.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be taken (then `body` doesn't run), or
    /// if the restore after `body` fails.
    pub fn preserve<T>(&self, body: impl FnOnce() -> T) -> Result<T, TtyError> {
        let guard = AttributesGuard::new(*self)?;
        let value = body();
        guard.restore_now()?;
        Ok(value)
    }

    fn query(&self) -> Result<Termios, TtyError> {
        let fd = self.handle.fd()?;
        termios::tcgetattr(fd).map_err(|source| TtyError::AttributeQuery { source })
    }

    fn apply(&self, termios: &Termios) -> Result<(), TtyError> {
        let fd = self.handle.fd()?;
        termios::tcsetattr(fd, OptionalActions::Now, termios)
            .map_err(|source| TtyError::AttributeApply { source })
    }

    fn update_attributes(&self, delta: FlagDelta) -> Result<(), TtyError> {
        let mut termios = self.query()?;
        delta.apply(&mut termios);
        self.apply(&termios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TtyErrorCategory, test_fixtures::{InProcessPty, PipePair}};
    use pretty_assertions::assert_eq;
    use rustix::{io::Errno,
                 termios::{InputModes, LocalModes}};

    #[test]
    fn test_set_raw_twice_is_identical_to_once() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        modes.set_raw().unwrap();
        let once = modes.snapshot().unwrap();
        modes.set_raw().unwrap();
        let twice = modes.snapshot().unwrap();

        assert_eq!(once, twice);
        assert_eq!(once.mode(), Some(TerminalMode::Raw));
    }

    #[test]
    fn test_each_mode_sets_its_flags() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        modes.set_cooked().unwrap();
        let termios = modes.snapshot().unwrap();
        let termios = termios.termios();
        assert!(termios.local_modes.contains(
            LocalModes::ICANON | LocalModes::ISIG | LocalModes::IEXTEN
        ));
        assert!(
            termios
                .input_modes
                .contains(InputModes::IXON | InputModes::BRKINT)
        );
        assert_eq!(modes.current_mode().unwrap(), Some(TerminalMode::Cooked));

        modes.set_cbreak().unwrap();
        let termios = modes.snapshot().unwrap();
        let termios = termios.termios();
        assert!(termios.local_modes.contains(LocalModes::ISIG));
        assert!(
            !termios
                .local_modes
                .intersects(LocalModes::ICANON | LocalModes::IEXTEN)
        );
        assert_eq!(modes.current_mode().unwrap(), Some(TerminalMode::CBreak));

        modes.set_raw().unwrap();
        let termios = modes.snapshot().unwrap();
        let termios = termios.termios();
        assert!(!termios.local_modes.intersects(
            LocalModes::ICANON | LocalModes::ISIG | LocalModes::IEXTEN
        ));
        assert!(
            !termios
                .input_modes
                .intersects(InputModes::IXON | InputModes::BRKINT)
        );
        assert_eq!(modes.current_mode().unwrap(), Some(TerminalMode::Raw));
    }

    #[test]
    fn test_mode_changes_leave_unmanaged_settings_alone() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        let before = modes.snapshot().unwrap();
        modes.set_raw().unwrap();
        let after = modes.snapshot().unwrap();

        let (before, after) = (before.termios(), after.termios());
        assert_eq!(before.output_modes, after.output_modes);
        assert_eq!(before.control_modes, after.control_modes);
        assert_eq!(
            before.input_modes.contains(InputModes::ICRNL),
            after.input_modes.contains(InputModes::ICRNL)
        );
        assert_eq!(
            before.local_modes.contains(LocalModes::ECHO),
            after.local_modes.contains(LocalModes::ECHO)
        );
    }

    #[test]
    fn test_echo_and_mode_are_independent() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        modes.set_raw().unwrap();
        modes.set_echo(false).unwrap();
        assert_eq!(modes.current_mode().unwrap(), Some(TerminalMode::Raw));
        assert!(!modes.is_echo_enabled().unwrap());

        modes.set_cbreak().unwrap();
        assert!(!modes.is_echo_enabled().unwrap());

        modes.set_echo(true).unwrap();
        assert_eq!(modes.current_mode().unwrap(), Some(TerminalMode::CBreak));
        assert!(modes.is_echo_enabled().unwrap());

        modes.set_cooked().unwrap();
        assert!(modes.is_echo_enabled().unwrap());
    }

    #[test]
    fn test_restore_of_snapshot_round_trips() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        let before = modes.snapshot().unwrap();
        modes.set_raw().unwrap();
        modes.set_echo(false).unwrap();
        assert_ne!(modes.snapshot().unwrap(), before);

        modes.restore(Some(&before)).unwrap();
        assert_eq!(modes.snapshot().unwrap(), before);

        // Restoring the current state changes nothing.
        let current = modes.snapshot().unwrap();
        modes.restore(Some(&current)).unwrap();
        assert_eq!(modes.snapshot().unwrap(), current);
    }

    #[test]
    fn test_restore_none_is_a_no_op() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        modes.set_cbreak().unwrap();
        let before = modes.snapshot().unwrap();
        modes.restore(None).unwrap();
        assert_eq!(modes.snapshot().unwrap(), before);

        // Even a handle that can't be opened accepts it.
        let broken = TtyHandle::with_device_path("/nonexistent/r3bl_tty/device");
        assert!(broken.mode_controller().restore(None).is_ok());
    }

    #[test]
    fn test_get_size_reports_driver_window_size() {
        let pty = InProcessPty::try_new().unwrap();
        pty.set_window_size(TerminalSize {
            columns: 120,
            rows: 40,
        })
        .unwrap();
        let handle = pty.controlled_handle().unwrap();

        let size = handle.mode_controller().get_size().unwrap();
        assert_eq!(size, TerminalSize {
            columns: 120,
            rows: 40
        });
    }

    #[test]
    fn test_preserve_restores_after_body() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        let before = modes.snapshot().unwrap();
        let value = modes
            .preserve(|| {
                modes.set_raw().unwrap();
                modes.set_echo(false).unwrap();
                modes.current_mode().unwrap()
            })
            .unwrap();

        assert_eq!(value, Some(TerminalMode::Raw));
        assert_eq!(modes.snapshot().unwrap(), before);
    }

    #[test]
    fn test_preserve_restores_when_body_panics() {
        let pty = InProcessPty::try_new().unwrap();
        let handle = pty.controlled_handle().unwrap();
        let modes = handle.mode_controller();

        let before = modes.snapshot().unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            modes.preserve(|| {
                modes.set_raw().unwrap();
                if modes.current_mode().unwrap() == Some(TerminalMode::Raw) {
                    panic!("body failed");
                }
            })
        }));

        assert!(result.is_err());
        assert_eq!(modes.snapshot().unwrap(), before);
    }

    #[test]
    fn test_non_terminal_reports_attribute_query_error() {
        let pipe = PipePair::try_new().unwrap();
        let handle = pipe.reader_handle().unwrap();
        let modes = handle.mode_controller();

        for result in [
            modes.set_cooked(),
            modes.set_cbreak(),
            modes.set_raw(),
            modes.set_echo(true),
        ] {
            let error = result.unwrap_err();
            assert_eq!(error.category(), TtyErrorCategory::AttributeQuery);
            assert_eq!(error.raw_os_error(), Some(Errno::NOTTY.raw_os_error()));
        }

        let error = modes.snapshot().unwrap_err();
        assert_eq!(error.category(), TtyErrorCategory::AttributeQuery);

        let error = modes.get_size().unwrap_err();
        assert_eq!(error.category(), TtyErrorCategory::SizeQuery);
    }

    #[test]
    fn test_restore_onto_non_terminal_reports_attribute_apply_error() {
        let pty = InProcessPty::try_new().unwrap();
        let pty_handle = pty.controlled_handle().unwrap();
        let snapshot = pty_handle.mode_controller().snapshot().unwrap();

        let pipe = PipePair::try_new().unwrap();
        let pipe_handle = pipe.reader_handle().unwrap();

        let error = pipe_handle
            .mode_controller()
            .restore(Some(&snapshot))
            .unwrap_err();
        assert_eq!(error.category(), TtyErrorCategory::AttributeApply);
        assert_eq!(error.raw_os_error(), Some(Errno::NOTTY.raw_os_error()));
        assert!(matches!(error, TtyError::AttributeApply { source } if source == Errno::NOTTY));
    }
}
