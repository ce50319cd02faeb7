use crate::application::dto::OptimizeResponse;
use crate::optimization::domain::{OptimizationAction, RunMetadata};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

/// Serialized shape of the JSON report
#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a RunMetadata,
    dockerfile_modified: bool,
    dockerignore_modified: bool,
    actions_taken: &'a [OptimizationAction],
    recommendations: &'a [OptimizationAction],
}

/// JsonReportFormatter adapter for the machine-readable report
///
/// This adapter implements the ReportFormatter port with pretty-printed JSON.
/// File contents are not included; they are written to the output directory.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, response: &OptimizeResponse) -> Result<String> {
        let report = JsonReport {
            metadata: &response.metadata,
            dockerfile_modified: response.dockerfile_modified,
            dockerignore_modified: response.dockerignore_modified,
            actions_taken: &response.actions_taken,
            recommendations: &response.recommendations,
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
