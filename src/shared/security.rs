use crate::shared::error::ShrinkError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum size of a project artifact (Dockerfile, .dockerignore, package.json) - 10 MB
pub const MAX_ARTIFACT_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum size of a file handed to the advisory service through the restricted view - 1 MiB
pub const MAX_ADVISORY_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is missing, is a symbolic link, is not a regular
/// file, or is larger than `max_size` bytes.
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ShrinkError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(ShrinkError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Symbolic links are not followed. Pass the real file instead.".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(ShrinkError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    validate_file_size(metadata.len(), path, max_size)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(ShrinkError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "File is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_size, max_size
            ),
            hint: "Large files are never read into memory.".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Validates that a caller-supplied path stays inside a sandbox root.
///
/// Only plain relative paths are accepted: no root, no drive prefix and no
/// `..` components. `.` components are allowed and ignored.
pub fn validate_sandboxed_relative_path(relative: &Path) -> Result<()> {
    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ShrinkError::SecurityError {
                    path: relative.to_path_buf(),
                    reason: "Path contains '..' which is not allowed".to_string(),
                    hint: "Only paths inside the project directory can be accessed.".to_string(),
                }
                .into());
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ShrinkError::SecurityError {
                    path: relative.to_path_buf(),
                    reason: "Absolute paths are not allowed".to_string(),
                    hint: "Use a path relative to the project directory.".to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}
