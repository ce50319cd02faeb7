use crate::shared::Result;
use std::path::PathBuf;

/// ArtifactWriter port for persisting optimized artifacts
pub trait ArtifactWriter {
    /// Writes `contents` under `file_name` at the writer's destination
    ///
    /// # Returns
    /// The path that was written
    ///
    /// # Errors
    /// Returns an error if the destination cannot be created or written
    fn write_artifact(&self, file_name: &str, contents: &str) -> Result<PathBuf>;
}
