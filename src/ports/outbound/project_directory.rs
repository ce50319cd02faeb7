use crate::shared::Result;

/// ProjectDirectory port giving read-only access to a project's files
///
/// Paths are relative to the project root. Implementations must refuse
/// anything that would escape the root.
pub trait ProjectDirectory {
    /// Reads a UTF-8 text file
    ///
    /// # Errors
    /// Returns an error if the path is outside the project, is not a regular
    /// file, is too large, or cannot be read
    fn read_file(&self, relative_path: &str) -> Result<String>;

    /// Lists the entries of a directory, sorted, directories suffixed with `/`
    ///
    /// # Errors
    /// Returns an error if the path is outside the project or not a directory
    fn list_directory(&self, relative_path: &str) -> Result<Vec<String>>;
}
