/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod restricted_filesystem;

pub use file_reader::FileSystemReader;
pub use file_writer::{OutputDirectoryWriter, StdoutPresenter};
pub use restricted_filesystem::RestrictedFilesystem;
