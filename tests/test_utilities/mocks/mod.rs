/// Mock implementations for testing
mod mock_advisory_service;
mod mock_progress_reporter;
mod mock_project_directory;

pub use mock_advisory_service::MockAdvisoryService;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_project_directory::MockProjectDirectory;
