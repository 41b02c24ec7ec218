// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CommonResult, ok};
use miette::IntoDiagnostic;
use std::{ops::Deref,
          path::{Path, PathBuf},
          sync::atomic::{AtomicU64, Ordering},
          time::{SystemTime, UNIX_EPOCH}};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// A temporary directory that is deleted when dropped.
#[derive(Debug)]
pub struct TempDir {
    pub inner: PathBuf,
}

impl TempDir {
    /// Join a path to the temporary directory.
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf { self.inner.join(path) }
}

/// Create a uniquely named directory under [`std::env::temp_dir()`].
///
/// # Errors
///
/// Returns an error if the directory can't be created.
pub fn try_create_temp_dir() -> CommonResult<TempDir> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|it| it.subsec_nanos())
        .unwrap_or_default();
    let name = format!(
        "r3bl_tty_{}_{}_{nanos}",
        std::process::id(),
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    );
    let inner = std::env::temp_dir().join(name);
    std::fs::create_dir(&inner).into_diagnostic()?;
    ok!(TempDir { inner })
}

impl Drop for TempDir {
    fn drop(&mut self) {
        // We don't care about the result of this operation.
        std::fs::remove_dir_all(&self.inner).ok();
    }
}

impl Deref for TempDir {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target { &self.inner }
}

impl AsRef<Path> for TempDir {
    fn as_ref(&self) -> &Path { &self.inner }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_removed_on_drop() {
        let first = try_create_temp_dir().unwrap();
        let second = try_create_temp_dir().unwrap();
        assert_ne!(first.inner, second.inner);
        assert!(first.exists());

        let path = first.inner.clone();
        drop(first);
        assert!(!path.exists());
    }
}
