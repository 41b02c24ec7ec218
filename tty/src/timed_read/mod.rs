// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Private modules (hide internal structure).
mod read_outcome;
mod timed_reader;

// Re-export the public API (flat, ergonomic surface).
pub use read_outcome::*;
pub use timed_reader::*;
