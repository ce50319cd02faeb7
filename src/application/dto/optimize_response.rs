use crate::optimization::domain::{OptimizationAction, RunMetadata};

/// OptimizeResponse - Result of a successful optimization run
///
/// `actions_taken` are already reflected in the returned texts;
/// `recommendations` are informational only.
#[derive(Debug, Clone)]
pub struct OptimizeResponse {
    pub dockerfile: String,
    pub dockerignore: String,
    /// Whether the Dockerfile text differs from the input
    pub dockerfile_modified: bool,
    /// Whether the .dockerignore was created or its text changed
    pub dockerignore_modified: bool,
    pub actions_taken: Vec<OptimizationAction>,
    pub recommendations: Vec<OptimizationAction>,
    pub metadata: RunMetadata,
}

impl OptimizeResponse {
    /// True when the run neither changed nor suggested anything
    pub fn is_already_optimized(&self) -> bool {
        self.actions_taken.is_empty() && self.recommendations.is_empty()
    }
}
