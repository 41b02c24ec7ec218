// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Structured logging for the library and `ttyctl`, built on [`tracing`].
//!
//! The library itself only emits events (opening the device, mode switches, reads,
//! failed restores). Nothing is printed unless the application installs a subscriber,
//! either globally ([`try_initialize_logging_global()`]) or for the current thread
//! ([`TracingConfig::install_thread_local()`], handy in tests).
//!
//! Logs go to `stdout`, `stderr`, a file, or a display and a file at once, see
//! [`WriterConfig`]. Since this crate puts terminals into raw mode, prefer a file when
//! logging from an interactive session: raw mode leaves output processing alone, but
//! display logs still interleave with whatever the program draws.

// Attach sources.
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
