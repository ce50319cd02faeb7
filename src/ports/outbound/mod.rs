/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, advisory service, console, etc.).
pub mod advisory_service;
pub mod artifact_writer;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_directory;
pub mod project_reader;
pub mod report_formatter;

pub use advisory_service::{AdvisoryRequest, AdvisoryResponse, AdvisoryService};
pub use artifact_writer::ArtifactWriter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_directory::ProjectDirectory;
pub use project_reader::ProjectReader;
pub use report_formatter::ReportFormatter;
