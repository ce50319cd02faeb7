use super::image::ImageRef;
use super::parser;
use super::stage::Stage;
use crate::shared::error::ShrinkError;
use crate::shared::Result;
use dockerfile_parser::{Dockerfile as ParsedDockerfile, Instruction, Span};

/// Dockerfile provides read-write access to a Dockerfile.
///
/// The source text is the only thing ever written back out; the stages are
/// an index derived from it. Every mutation splices the text and re-parses
/// it, so queries always reflect the current text.
#[derive(Debug, Clone)]
pub struct Dockerfile {
    code: String,
    stages: Vec<Stage>,
}

impl Dockerfile {
    /// Parses `contents` into a Dockerfile.
    ///
    /// # Errors
    /// - `ShrinkError::EmptyInput` if the text is blank after trimming
    /// - `ShrinkError::Parse` if the text cannot be parsed
    pub fn new(contents: impl Into<String>) -> Result<Self> {
        let code = contents.into();
        if code.trim().is_empty() {
            return Err(ShrinkError::EmptyInput.into());
        }
        let parsed = parser::parse(&code)?;
        let stages = index_stages(&code, &parsed);
        Ok(Self { code, stages })
    }

    /// Checks that `code` is structurally parseable.
    ///
    /// This is not a full validator: a Dockerfile passing this check can still
    /// fail to build. It only guarantees that the instructions can be read.
    pub fn validate(code: &str) -> Result<()> {
        parser::parse(code).map(|_| ())
    }

    pub fn is_valid(code: &str) -> bool {
        Self::validate(code).is_ok()
    }

    /// Current text, byte-for-byte
    pub fn raw(&self) -> &str {
        &self.code
    }

    /// Number of stages (FROM instructions)
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// All stages in source order
    pub fn stages(&self) -> Vec<Stage> {
        self.stages.clone()
    }

    /// Returns the last stage in the Dockerfile
    ///
    /// # Errors
    /// Returns `ShrinkError::NoStagesFound` if there is no FROM instruction.
    pub fn final_stage(&self) -> Result<Stage> {
        self.stages
            .last()
            .cloned()
            .ok_or_else(|| ShrinkError::NoStagesFound.into())
    }

    /// Sets the base image of `stage` to `image`.
    ///
    /// Only the image token of the stage's FROM instruction is spliced; every
    /// other byte of the file, including comments, flags and the `AS` alias,
    /// stays untouched. The stages are rebuilt from the edited text afterwards.
    ///
    /// # Errors
    /// - `ShrinkError::Validation` if `stage` does not belong to the current text
    /// - `ShrinkError::InternalConsistency` if the edit produces text that no
    ///   longer parses or changes the stage layout
    pub fn set_stage_base_image(&mut self, stage: &Stage, image: &ImageRef) -> Result<()> {
        if self.stages.get(stage.index()) != Some(stage) {
            return Err(ShrinkError::Validation {
                message: format!(
                    "Stage {} (line {}) does not match the current Dockerfile; it was obtained before a modification",
                    stage.index(),
                    stage.line_num()
                ),
            }
            .into());
        }

        let new_image = image.full_name();
        let consistency = |details: String| ShrinkError::InternalConsistency {
            details: format!(
                "setting base image of stage {} to {}: {}",
                stage.index(),
                new_image,
                details
            ),
        };

        let parsed = parser::parse(&self.code).map_err(|e| consistency(e.to_string()))?;
        let (start, end) = stage.image_span();
        let mut splicer = parsed.splicer();
        splicer.splice(&Span::new(start, end), &new_image);
        let modified_code = splicer.content;

        let modified = parser::parse(&modified_code)
            .map_err(|e| consistency(format!("Dockerfile no longer parses: {}", e)))?;
        let stages = index_stages(&modified_code, &modified);
        let replaced = stages.get(stage.index()).map(Stage::base_image_text);
        if stages.len() != self.stages.len() || replaced != Some(new_image.as_str()) {
            return Err(consistency("stage layout changed after the edit".to_string()).into());
        }

        self.code = modified_code;
        self.stages = stages;
        Ok(())
    }
}

/// Builds the stage index from the crate's stage iteration
fn index_stages(code: &str, parsed: &ParsedDockerfile) -> Vec<Stage> {
    parsed
        .iter_stages()
        .map(|stage| {
            let node_index = parsed
                .instructions
                .iter()
                .position(|instruction| {
                    matches!(instruction, Instruction::From(from) if from.span.start == stage.root.span.start)
                })
                .unwrap_or(stage.index);
            Stage::from_instruction(stage.index, node_index, code, stage.root)
        })
        .collect()
}
