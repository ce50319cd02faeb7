use crate::optimization::domain::RunMetadata;
use chrono::Utc;
use uuid::Uuid;

/// RunMetadataGenerator stamps each optimization run with time and identity
pub struct RunMetadataGenerator;

impl RunMetadataGenerator {
    /// Generates metadata with the current UTC timestamp and a fresh run id
    pub fn generate(tool_name: &str, tool_version: &str) -> RunMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let run_id = format!("urn:uuid:{}", Uuid::new_v4());

        RunMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            run_id,
        )
    }

    /// Generates metadata for this build of dockershrink
    pub fn generate_default() -> RunMetadata {
        Self::generate("dockershrink", env!("CARGO_PKG_VERSION"))
    }
}
