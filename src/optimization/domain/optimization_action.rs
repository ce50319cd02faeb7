use serde::{Deserialize, Serialize};

/// OptimizationAction describes one concrete change to the project
///
/// The same record is used for changes already applied (actions taken) and
/// changes only suggested (recommendations).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationAction {
    pub rule: String,
    pub filename: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl OptimizationAction {
    pub fn new(
        rule: impl Into<String>,
        filename: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            filename: filename.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}
