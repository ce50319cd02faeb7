use crate::ports::outbound::{ArtifactWriter, OutputPresenter};
use crate::shared::error::ShrinkError;
use crate::shared::Result;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// OutputDirectoryWriter adapter for writing optimized artifacts
///
/// This adapter implements the ArtifactWriter port. Files land directly in
/// the output directory, which is created on first write.
pub struct OutputDirectoryWriter {
    output_dir: PathBuf,
}

impl OutputDirectoryWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_output_dir(&self) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(&self.output_dir) {
            if metadata.is_symlink() {
                return Err(ShrinkError::FileWriteError {
                    path: self.output_dir.clone(),
                    details: "Security: Output directory is a symbolic link. For security reasons, writing through symbolic links is not allowed.".to_string(),
                }
                .into());
            }
            if !metadata.is_dir() {
                return Err(ShrinkError::FileWriteError {
                    path: self.output_dir.clone(),
                    details: "Output path exists and is not a directory".to_string(),
                }
                .into());
            }
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ShrinkError::FileWriteError {
                path: self.output_dir.clone(),
                details: format!("Failed to create output directory: {}", e),
            }
            .into()
        })
    }

    /// Rejects names that would leave the output directory and symlinked targets
    fn validate_target(&self, file_name: &str, target: &Path) -> Result<()> {
        let is_plain_name = Path::new(file_name).file_name() == Some(OsStr::new(file_name));
        if !is_plain_name {
            return Err(ShrinkError::FileWriteError {
                path: target.to_path_buf(),
                details: format!("'{}' is not a plain file name", file_name),
            }
            .into());
        }

        if fs::symlink_metadata(target).is_ok_and(|m| m.is_symlink()) {
            return Err(ShrinkError::FileWriteError {
                path: target.to_path_buf(),
                details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl ArtifactWriter for OutputDirectoryWriter {
    fn write_artifact(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let target = self.output_dir.join(file_name);
        self.validate_target(file_name, &target)?;
        self.ensure_output_dir()?;

        fs::write(&target, contents).map_err(|e| ShrinkError::FileWriteError {
            path: target.clone(),
            details: e.to_string(),
        })?;

        Ok(target)
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
