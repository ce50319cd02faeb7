/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod optimize_request;
mod optimize_response;
mod output_format;

pub use optimize_request::OptimizeRequest;
pub use optimize_response::OptimizeResponse;
pub use output_format::OutputFormat;
