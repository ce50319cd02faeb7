use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause carried by advisory failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between argument mistakes
/// and failures while optimizing the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the optimization run completed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (parse error, advisory service error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for Dockerfile optimization.
///
/// The first six variants form the optimization taxonomy: every one of them
/// aborts the whole run. The remaining variants describe I/O problems around
/// reading the project and writing the optimized artifacts.
#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("Dockerfile is empty\n\n💡 Hint: Provide a Dockerfile with at least one FROM instruction")]
    EmptyInput,

    #[error("Failed to parse Dockerfile: {details}\n\n💡 Hint: Please verify that the Dockerfile is syntactically valid")]
    Parse { details: String },

    #[error("No stages found in Dockerfile\n\n💡 Hint: Every Dockerfile needs at least one FROM instruction")]
    NoStagesFound,

    #[error("Advisory service failed to optimize Dockerfile")]
    AdvisoryService {
        #[source]
        source: BoxedCause,
    },

    #[error("Failed to parse Dockerfile returned by advisory service")]
    AdvisoryResponseInvalid {
        #[source]
        source: BoxedCause,
    },

    #[error("Internal consistency failure: {details}")]
    InternalConsistency { details: String },

    /// Validation error for caller-supplied values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl ShrinkError {
    pub fn parse(details: impl Into<String>) -> Self {
        ShrinkError::Parse {
            details: details.into(),
        }
    }

    pub fn advisory_service(cause: anyhow::Error) -> Self {
        ShrinkError::AdvisoryService {
            source: cause.into(),
        }
    }

    pub fn advisory_response_invalid(cause: anyhow::Error) -> Self {
        ShrinkError::AdvisoryResponseInvalid {
            source: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let error = ShrinkError::parse("line 4: unknown instruction: FORM");
        let display = format!("{}", error);
        assert!(display.contains("line 4"));
        assert!(display.contains("unknown instruction: FORM"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_advisory_service_error_keeps_cause() {
        let error = ShrinkError::advisory_service(anyhow::anyhow!("status 500"));
        assert!(format!("{}", error).contains("Advisory service failed"));
        let cause = error.source().unwrap();
        assert_eq!(cause.to_string(), "status 500");
    }

    #[test]
    fn test_advisory_response_invalid_keeps_cause() {
        let error = ShrinkError::advisory_response_invalid(anyhow::anyhow!("bad FROM"));
        assert!(format!("{}", error).contains("returned by advisory service"));
        assert_eq!(error.source().unwrap().to_string(), "bad FROM");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = ShrinkError::NoStagesFound.into();
        assert!(matches!(
            err.downcast_ref::<ShrinkError>(),
            Some(ShrinkError::NoStagesFound)
        ));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = ShrinkError::FileWriteError {
            path: PathBuf::from("/test/out/Dockerfile"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/out/Dockerfile"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_security_error_display() {
        let error = ShrinkError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Symbolic links are not allowed"));
        assert!(display.contains("Use a regular file instead"));
    }
}
