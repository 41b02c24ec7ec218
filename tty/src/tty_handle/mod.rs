// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod tty_handle_core;

// Re-export the public API (flat, ergonomic surface).
pub use tty_handle_core::*;
