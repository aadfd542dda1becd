//! File system helpers.

use crate::domain::{AppError, Result};
use std::path::Path;
use tracing::debug;

fn fs_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::FileSystem(format!("{}: {}", path.display(), e))
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| fs_error(path, e))
}

/// Delete a file, or a directory with everything below it.
/// A missing path is not an error.
pub fn remove(path: &Path) -> Result<()> {
    let Ok(metadata) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    debug!(path = %path.display(), "Removing");
    if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
    .map_err(|e| fs_error(path, e))
}

/// Names of the immediate subdirectories of `path`, sorted.
pub fn list_subfolders(path: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .map_err(|e| fs_error(path, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| fs_error(path, e))
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    std::fs::write(path, data).map_err(|e| fs_error(path, e))
}
