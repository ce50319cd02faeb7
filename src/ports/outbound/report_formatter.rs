use crate::application::dto::OptimizeResponse;
use crate::shared::Result;

/// ReportFormatter port for rendering the result of a run
///
/// Implementations exist for human-readable text and JSON.
pub trait ReportFormatter {
    /// Formats the actions taken and recommendations of a run
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, response: &OptimizeResponse) -> Result<String>;
}
