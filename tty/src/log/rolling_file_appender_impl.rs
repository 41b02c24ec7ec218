// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Create a file appender that never rolls over, at `path_str`. The file is created
/// (and appended to) right away.
///
/// Don't wrap this in [`tracing_appender::non_blocking()`]. The returned guard would
/// have to outlive the subscriber, and a short lived CLI drops it too early.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
/// - Insufficient permissions to create the file or directory
pub fn try_create(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = match path.parent() {
        // A bare file name like `ttyctl.log` has an empty parent.
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => miette::bail!(
            "Can't access parent folder of {}. It might not exist, or you might not have the required permissions.",
            path.display()
        ),
    };

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't access file name {}. It might not exist, or you might not have the required permissions.",
            path.display()
        )
    })?;

    tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(parent)
        .map_err(|error| {
            miette::miette!("Can't create log file {}: {error}", path.display())
        })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_fixtures::try_create_temp_dir;

    #[test]
    fn test_creates_file_in_existing_dir() {
        let dir = try_create_temp_dir().unwrap();
        let file_path = dir.join("ttyctl.log");

        let _appender = try_create(file_path.to_str().unwrap()).unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_root_has_no_file_name() {
        assert!(try_create("/").is_err());
    }
}
