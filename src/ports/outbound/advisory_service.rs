use super::ProjectDirectory;
use crate::optimization::domain::OptimizationAction;
use crate::shared::Result;
use serde::Deserialize;

/// Everything the advisory service may look at for one run
pub struct AdvisoryRequest<'a> {
    pub dockerfile: &'a str,
    pub dockerignore: &'a str,
    pub package_json: &'a str,
    /// Read-only, sandboxed view of the project directory
    pub project_directory: &'a dyn ProjectDirectory,
    pub dockerfile_stage_count: usize,
}

/// Revised Dockerfile plus the changes the service made and suggests
///
/// The Dockerfile text is not yet validated; the caller re-parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdvisoryResponse {
    pub dockerfile: String,
    #[serde(default)]
    pub recommendations: Vec<OptimizationAction>,
    #[serde(default)]
    pub actions_taken: Vec<OptimizationAction>,
}

/// AdvisoryService port for delegating Dockerfile optimization
///
/// This port abstracts the external service (e.g., an LLM API) that proposes
/// a revised Dockerfile given full project context. Implementations make a
/// single attempt per call; the caller treats any error as fatal.
pub trait AdvisoryService {
    /// Asks the service for an optimized Dockerfile
    ///
    /// # Arguments
    /// * `request` - Current artifacts and the restricted project view
    ///
    /// # Returns
    /// The revised Dockerfile text with ordered recommendation and action records
    ///
    /// # Errors
    /// Returns an error if:
    /// - The service cannot be reached or answers with an error status
    /// - The answer does not have the expected shape
    fn optimize_dockerfile(&self, request: &AdvisoryRequest<'_>) -> Result<AdvisoryResponse>;
}
