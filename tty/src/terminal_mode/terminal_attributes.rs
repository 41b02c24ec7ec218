// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios winsize VINTR VQUIT VERASE VKILL VEOF VTIME VMIN VSTART VSTOP VSUSP VEOL VREPRINT VDISCARD VWERASE VLNEXT VSWTC VDSUSP VSTATUS

use crate::TerminalMode;
use rustix::termios::{LocalModes, SpecialCodeIndex, Termios};
use std::fmt::{Debug, Formatter};

/// Control characters defined on every supported Unix, all compared by
/// [`TerminalAttributes`] equality.
const COMPARED_SPECIAL_CODES: &[SpecialCodeIndex] = &[
    SpecialCodeIndex::VINTR,
    SpecialCodeIndex::VQUIT,
    SpecialCodeIndex::VERASE,
    SpecialCodeIndex::VKILL,
    SpecialCodeIndex::VEOF,
    SpecialCodeIndex::VTIME,
    SpecialCodeIndex::VMIN,
    SpecialCodeIndex::VSTART,
    SpecialCodeIndex::VSTOP,
    SpecialCodeIndex::VSUSP,
    SpecialCodeIndex::VEOL,
    SpecialCodeIndex::VEOL2,
    SpecialCodeIndex::VREPRINT,
    SpecialCodeIndex::VDISCARD,
    SpecialCodeIndex::VWERASE,
    SpecialCodeIndex::VLNEXT,
];

/// Control characters only some platforms define, compared as well.
#[cfg(any(target_os = "linux", target_os = "android"))]
const PLATFORM_SPECIAL_CODES: &[SpecialCodeIndex] = &[SpecialCodeIndex::VSWTC];

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd",
    target_os = "netbsd"
))]
const PLATFORM_SPECIAL_CODES: &[SpecialCodeIndex] =
    &[SpecialCodeIndex::VDSUSP, SpecialCodeIndex::VSTATUS];

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "openbsd",
    target_os = "netbsd"
)))]
const PLATFORM_SPECIAL_CODES: &[SpecialCodeIndex] = &[];

/// A point in time capture of the full terminal driver settings.
///
/// This is a plain value: clone it, keep it as long as you like, and hand it back to
/// [`ModeController::restore()`]. Nothing needs to be freed.
///
/// [`ModeController::restore()`]: crate::ModeController::restore
#[derive(Clone)]
pub struct TerminalAttributes {
    termios: Termios,
}

impl TerminalAttributes {
    #[must_use]
    pub fn termios(&self) -> &Termios { &self.termios }

    /// The mode these attributes are in, see [`TerminalMode::classify()`].
    #[must_use]
    pub fn mode(&self) -> Option<TerminalMode> {
        TerminalMode::classify(self.termios.local_modes, self.termios.input_modes)
    }

    #[must_use]
    pub fn is_echo_enabled(&self) -> bool {
        self.termios.local_modes.contains(LocalModes::ECHO)
    }
}

impl From<Termios> for TerminalAttributes {
    fn from(termios: Termios) -> Self { Self { termios } }
}

impl From<TerminalAttributes> for Termios {
    fn from(attributes: TerminalAttributes) -> Self { attributes.termios }
}

impl PartialEq for TerminalAttributes {
    fn eq(&self, other: &Self) -> bool {
        let (lhs, rhs) = (&self.termios, &other.termios);
        lhs.input_modes == rhs.input_modes
            && lhs.output_modes == rhs.output_modes
            && lhs.control_modes == rhs.control_modes
            && lhs.local_modes == rhs.local_modes
            && lhs.input_speed() == rhs.input_speed()
            && lhs.output_speed() == rhs.output_speed()
            && COMPARED_SPECIAL_CODES
                .iter()
                .chain(PLATFORM_SPECIAL_CODES)
                .all(|&index| lhs.special_codes[index] == rhs.special_codes[index])
    }
}

impl Eq for TerminalAttributes {}

impl Debug for TerminalAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalAttributes")
            .field("mode", &self.mode())
            .field("input_modes", &self.termios.input_modes)
            .field("output_modes", &self.termios.output_modes)
            .field("control_modes", &self.termios.control_modes)
            .field("local_modes", &self.termios.local_modes)
            .finish_non_exhaustive()
    }
}

/// Window dimensions reported by the terminal driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl From<TerminalSize> for (u16, u16) {
    fn from(size: TerminalSize) -> Self { (size.columns, size.rows) }
}
