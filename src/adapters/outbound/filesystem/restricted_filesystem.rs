use crate::ports::outbound::ProjectDirectory;
use crate::shared::error::ShrinkError;
use crate::shared::security::{
    validate_regular_file, validate_sandboxed_relative_path, MAX_ADVISORY_FILE_SIZE,
};
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// RestrictedFilesystem adapter exposing a project directory read-only
///
/// This adapter implements the ProjectDirectory port. Only relative paths
/// without `..` are accepted and no symbolic link is ever followed, so
/// nothing outside the root can be reached.
#[derive(Debug)]
pub struct RestrictedFilesystem {
    root: PathBuf,
}

impl RestrictedFilesystem {
    /// Creates a view rooted at `root`
    ///
    /// # Errors
    /// Returns `ShrinkError::InvalidProjectPath` if `root` is not an existing directory
    pub fn new(root: &Path) -> Result<Self> {
        let root = root.canonicalize().map_err(|e| ShrinkError::InvalidProjectPath {
            path: root.to_path_buf(),
            reason: format!("Failed to resolve path: {}", e),
        })?;
        if !root.is_dir() {
            return Err(ShrinkError::InvalidProjectPath {
                path: root,
                reason: "Path is not a directory".to_string(),
            }
            .into());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `relative` onto the root, refusing symlinks on the way
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let relative = Path::new(relative);
        validate_sandboxed_relative_path(relative)?;

        let mut path = self.root.clone();
        for component in relative.components() {
            let Component::Normal(part) = component else {
                continue;
            };
            path.push(part);
            if fs::symlink_metadata(&path).is_ok_and(|m| m.is_symlink()) {
                return Err(ShrinkError::SecurityError {
                    path: relative.to_path_buf(),
                    reason: "Path goes through a symbolic link".to_string(),
                    hint: "Only paths inside the project directory can be accessed.".to_string(),
                }
                .into());
            }
        }
        Ok(path)
    }
}

impl ProjectDirectory for RestrictedFilesystem {
    fn read_file(&self, relative_path: &str) -> Result<String> {
        let path = self.resolve(relative_path)?;
        validate_regular_file(&path, relative_path, MAX_ADVISORY_FILE_SIZE)?;

        fs::read_to_string(&path).map_err(|e| {
            ShrinkError::FileReadError {
                path: PathBuf::from(relative_path),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn list_directory(&self, relative_path: &str) -> Result<Vec<String>> {
        let path = self.resolve(relative_path)?;
        let read_dir = fs::read_dir(&path).map_err(|e| ShrinkError::FileReadError {
            path: PathBuf::from(relative_path),
            details: format!("Failed to list directory: {}", e),
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                name.push('/');
            }
            entries.push(name);
        }
        entries.sort();
        Ok(entries)
    }
}
