// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words ICANON IEXTEN IXON BRKINT cbreak

//! Modes as deltas over two flag groups.
//!
//! A mode switch never writes a whole attribute set. It turns a few bits on and a few
//! bits off and leaves every other driver setting alone, which makes each switch
//! idempotent and lets echo be toggled without disturbing the mode.
//!
//! | Mode   | `ICANON` | `ISIG` | `IEXTEN` | `IXON` | `BRKINT` |
//! | :----- | :------- | :----- | :------- | :----- | :------- |
//! | Cooked | on       | on     | on       | on     | on       |
//! | CBreak | off      | on     | off      | on     | on       |
//! | Raw    | off      | off    | off      | off    | off      |

use rustix::termios::{InputModes, LocalModes, Termios};
use std::fmt::{Display, Formatter};

/// The local flags a mode change manages.
pub const MODE_LOCAL_FLAGS: LocalModes = LocalModes::ICANON
    .union(LocalModes::ISIG)
    .union(LocalModes::IEXTEN);

/// The input flags a mode change manages.
pub const MODE_INPUT_FLAGS: InputModes = InputModes::IXON.union(InputModes::BRKINT);

/// Conceptual terminal input mode. Not stored anywhere: it is re-derived from the
/// flags every time (see [`TerminalMode::classify()`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalMode {
    /// Line buffered input with interrupt / quit keys and extended processing.
    Cooked,
    /// Byte at a time delivery, interrupt / quit keys still generate signals.
    CBreak,
    /// Byte at a time delivery with no special character interpretation.
    Raw,
}

impl TerminalMode {
    pub const ALL: [TerminalMode; 3] =
        [TerminalMode::Cooked, TerminalMode::CBreak, TerminalMode::Raw];

    #[must_use]
    pub fn flag_delta(self) -> FlagDelta {
        match self {
            TerminalMode::Cooked => FlagDelta {
                local_on: MODE_LOCAL_FLAGS,
                local_off: LocalModes::empty(),
                input_on: MODE_INPUT_FLAGS,
                input_off: InputModes::empty(),
            },
            TerminalMode::CBreak => FlagDelta {
                local_on: LocalModes::ISIG,
                local_off: LocalModes::ICANON.union(LocalModes::IEXTEN),
                input_on: MODE_INPUT_FLAGS,
                input_off: InputModes::empty(),
            },
            TerminalMode::Raw => FlagDelta {
                local_on: LocalModes::empty(),
                local_off: MODE_LOCAL_FLAGS,
                input_on: InputModes::empty(),
                input_off: MODE_INPUT_FLAGS,
            },
        }
    }

    /// Which mode the given flags are in, if any. Returns `None` when the flags are a
    /// mix that none of the three modes produce (e.g. a freshly allocated pty, which
    /// has `IXON` but not `BRKINT`).
    #[must_use]
    pub fn classify(local: LocalModes, input: InputModes) -> Option<TerminalMode> {
        TerminalMode::ALL
            .into_iter()
            .find(|mode| mode.flag_delta().is_satisfied_by(local, input))
    }
}

impl Display for TerminalMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalMode::Cooked => write!(f, "cooked"),
            TerminalMode::CBreak => write!(f, "cbreak"),
            TerminalMode::Raw => write!(f, "raw"),
        }
    }
}

/// Bits to set and bits to clear, in the local and input flag groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDelta {
    pub local_on: LocalModes,
    pub local_off: LocalModes,
    pub input_on: InputModes,
    pub input_off: InputModes,
}

impl FlagDelta {
    /// Delta that only touches `ECHO`.
    #[must_use]
    pub fn echo(enabled: bool) -> Self {
        let (local_on, local_off) = if enabled {
            (LocalModes::ECHO, LocalModes::empty())
        } else {
            (LocalModes::empty(), LocalModes::ECHO)
        };
        Self {
            local_on,
            local_off,
            input_on: InputModes::empty(),
            input_off: InputModes::empty(),
        }
    }

    pub fn apply_to_flags(&self, local: &mut LocalModes, input: &mut InputModes) {
        local.insert(self.local_on);
        local.remove(self.local_off);
        input.insert(self.input_on);
        input.remove(self.input_off);
    }

    pub fn apply(&self, termios: &mut Termios) {
        self.apply_to_flags(&mut termios.local_modes, &mut termios.input_modes);
    }

    #[must_use]
    pub fn is_satisfied_by(&self, local: LocalModes, input: InputModes) -> bool {
        local.contains(self.local_on)
            && !local.intersects(self.local_off)
            && input.contains(self.input_on)
            && !input.intersects(self.input_off)
    }
}
