// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `ttyctl` command line tool: each subcommand drives one part of the library
//! against a real terminal, which makes it handy for poking at terminal state by hand.
//!
//! ```bash
//! ttyctl snapshot                       # mode: cooked, echo: on
//! ttyctl read --mode raw --timeout-us 2000000
//! ttyctl --device /dev/pts/3 size       # Another terminal you own.
//! ttyctl --log-level debug --log-file /tmp/ttyctl.log raw-echo
//! ```

// Attach sources.
pub mod cli_arg;
pub mod command_handlers;

// Re-export.
pub use cli_arg::*;
pub use command_handlers::*;
