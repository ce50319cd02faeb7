use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ProjectReader port for reading the input artifacts of a project
///
/// This port abstracts the file system operations needed to load the
/// Dockerfile and its companion files before a run.
pub trait ProjectReader {
    /// Reads the Dockerfile
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be read
    fn read_dockerfile(&self, path: &Path) -> Result<String>;

    /// Reads the .dockerignore file, `None` if it does not exist
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read
    fn read_dockerignore(&self, path: &Path) -> Result<Option<String>>;

    /// Reads package.json, `None` if it does not exist
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read
    fn read_package_json(&self, path: &Path) -> Result<Option<String>>;

    /// Finds package.json in the conventional locations of a project
    ///
    /// # Returns
    /// The first existing candidate, or None
    fn find_package_json(&self, project_dir: &Path) -> Option<PathBuf>;
}
