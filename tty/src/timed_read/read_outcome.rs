// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// What a single byte read produced.
///
/// The "no byte" cases are separate variants, so no byte value can be mistaken for
/// them: `0xFF` is [`ReadOutcome::Byte(0xFF)`](ReadOutcome::Byte), never a failure.
/// Read and readiness errors are reported through [`TtyError`] instead.
///
/// [`TtyError`]: crate::TtyError
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadOutcome {
    Byte(u8),
    /// The timeout elapsed before the terminal became readable.
    TimedOut,
    /// The descriptor was readable but `read` returned zero bytes.
    EndOfInput,
}

/// The single out of band value used by [`ReadOutcome::into_legacy_code()`].
pub const LEGACY_NO_BYTE: i32 = -1;

impl ReadOutcome {
    #[must_use]
    pub fn byte(self) -> Option<u8> {
        match self {
            ReadOutcome::Byte(byte) => Some(byte),
            ReadOutcome::TimedOut | ReadOutcome::EndOfInput => None,
        }
    }

    /// Collapse into the integer convention of C style `getc`: `0..=255` for a byte
    /// (unsigned, then widened) and [`LEGACY_NO_BYTE`] for everything else.
    #[must_use]
    pub fn into_legacy_code(self) -> i32 {
        self.byte().map_or(LEGACY_NO_BYTE, i32::from)
    }
}
