//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as atomic file writes, timestamped file names and path expansion.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如原子文件写入、带时间戳的文件名和路径展开。

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Timestamp layout used in generated file names, e.g. `20250825_153000`.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Creates the parent directory of `path` if it does not exist yet.
///
/// # Arguments
/// * `path` - Path of a file about to be written
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

/// Writes `contents` to `path` so that readers never observe a partial file.
///
/// The data goes to a temporary file in the destination directory, is synced
/// and then renamed over `path`. Missing parent directories are created.
///
/// # Arguments
/// * `path` - Destination file path
/// * `contents` - Complete file contents
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    temp.as_file_mut()
        .sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move file into place: {}", path.display()))?;
    Ok(())
}

/// Builds `<dir>/<prefix>_<timestamp>.<extension>` using the current local time.
///
/// # Returns
/// The path; nothing is created on disk
pub fn timestamped_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        prefix,
        Local::now().format(FILE_TIMESTAMP_FORMAT),
        extension
    ))
}

/// Replaces every character that is not alphanumeric, `-` or `_` with `_`,
/// so a test name can be used as part of a file name.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Expands `~` and environment variables in a configured path and resolves
/// relative results against `base`.
///
/// # Arguments
/// * `raw` - The path as written in the configuration
/// * `base` - Directory relative paths are resolved against
pub fn expand_path(raw: &str, base: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {}", raw))?;
    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base.join(path))
    }
}
