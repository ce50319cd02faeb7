use crate::application::dto::OptimizeResponse;
use crate::optimization::domain::OptimizationAction;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use owo_colors::{OwoColorize, Style};

const ALREADY_OPTIMIZED: &str = "Docker image is already optimized; no further actions were taken.";

/// TextReportFormatter adapter for the human-readable report
///
/// This adapter implements the ReportFormatter port. Colours are optional
/// so the same output can be piped or compared in tests.
pub struct TextReportFormatter {
    colored: bool,
}

impl TextReportFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Renders one section; every description line is indented under its title
    fn render_section(
        &self,
        output: &mut String,
        heading: &str,
        records: &[OptimizationAction],
        style: Style,
    ) {
        output.push('\n');
        output.push_str(&self.paint(heading, Style::new().bold()));
        output.push('\n');

        for (i, record) in records.iter().enumerate() {
            let title = format!("{}. {} ({})", i + 1, record.title, record.filename);
            output.push_str(&self.paint(&title, style));
            output.push('\n');
            for line in record.description.lines() {
                output.push_str("   ");
                output.push_str(line);
                output.push('\n');
            }
        }
    }
}

impl Default for TextReportFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ReportFormatter for TextReportFormatter {
    fn format(&self, response: &OptimizeResponse) -> Result<String> {
        let mut output = String::new();

        if response.is_already_optimized() {
            output.push_str(&self.paint(ALREADY_OPTIMIZED, Style::new().green()));
            output.push('\n');
            return Ok(output);
        }

        if !response.actions_taken.is_empty() {
            self.render_section(
                &mut output,
                "Actions Taken:",
                &response.actions_taken,
                Style::new().blue(),
            );
        }
        if !response.recommendations.is_empty() {
            self.render_section(
                &mut output,
                "Recommendations:",
                &response.recommendations,
                Style::new().cyan(),
            );
        }

        Ok(output)
    }
}
