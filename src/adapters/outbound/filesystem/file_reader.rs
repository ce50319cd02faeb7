use crate::ports::outbound::ProjectReader;
use crate::shared::error::ShrinkError;
use crate::shared::security::{validate_regular_file, MAX_ARTIFACT_SIZE};
use crate::shared::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Locations searched for package.json, relative to the project directory
const PACKAGE_JSON_CANDIDATES: [&str; 2] = ["package.json", "src/package.json"];

/// FileSystemReader adapter for reading project artifacts from the file system
///
/// This adapter implements the ProjectReader port. Every read rejects
/// symbolic links, non-regular files and oversized files.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path, file_type: &str) -> Result<String> {
        validate_regular_file(path, file_type, MAX_ARTIFACT_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            ShrinkError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Failed to read {}: {}", file_type, e),
            }
            .into()
        })
    }

    /// Like `safe_read_file`, but a missing file is `None`
    fn read_if_exists(&self, path: &Path, file_type: &str) -> Result<Option<String>> {
        match fs::symlink_metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            _ => self.safe_read_file(path, file_type).map(Some),
        }
    }
}

impl ProjectReader for FileSystemReader {
    fn read_dockerfile(&self, path: &Path) -> Result<String> {
        if fs::symlink_metadata(path).is_err() {
            return Err(ShrinkError::FileReadError {
                path: path.to_path_buf(),
                details: "Dockerfile does not exist. Run in the project root or point to it with --dockerfile.".to_string(),
            }
            .into());
        }
        self.safe_read_file(path, "Dockerfile")
    }

    fn read_dockerignore(&self, path: &Path) -> Result<Option<String>> {
        self.read_if_exists(path, ".dockerignore")
    }

    fn read_package_json(&self, path: &Path) -> Result<Option<String>> {
        self.read_if_exists(path, "package.json")
    }

    fn find_package_json(&self, project_dir: &Path) -> Option<PathBuf> {
        PACKAGE_JSON_CANDIDATES
            .iter()
            .map(|candidate| project_dir.join(candidate))
            .find(|path| path.is_file())
    }
}
