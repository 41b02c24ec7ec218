// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for testing terminal behavior without (or with) a controlling terminal.
//!
//! | Fixture                  | Backed by                           | Used for                              |
//! | :----------------------- | :---------------------------------- | :------------------------------------ |
//! | [`InProcessPty`]         | `openpt` in this process            | Modes, echo, size, reads on a pty     |
//! | [`PipePair`]             | `pipe`                              | Byte exactness, end of input, timing  |
//! | [`generate_pty_test!`]   | [`portable_pty`] child process      | The real `/dev/tty` of a session      |
//! | [`TempDir`]              | [`std::env::temp_dir`]              | Log files                             |
//!
//! [`generate_pty_test!`]: crate::generate_pty_test

pub mod in_process_pty;
pub mod pipe_pair;
pub mod temp_dir;

// Re-export.
pub use generate_pty_test::*;
pub use in_process_pty::*;
pub use pipe_pair::*;
pub use temp_dir::*;
