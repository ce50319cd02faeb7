use super::image::ImageRef;
use super::parser::line_of;
use crate::shared::Result;
use dockerfile_parser::FromInstruction;

/// Stage of a Dockerfile, opened by a FROM instruction
///
/// Stages are derived from the current text every time the Dockerfile
/// changes; a `Stage` obtained before a mutation must not be reused after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    stage_index: usize,
    node_index: usize,
    line_num: usize,
    base_image: String,
    /// Byte range of the image token in the Dockerfile text
    image_start: usize,
    image_end: usize,
    name: Option<String>,
    platform: Option<String>,
}

impl Stage {
    pub(crate) fn from_instruction(
        stage_index: usize,
        node_index: usize,
        code: &str,
        from: &FromInstruction,
    ) -> Self {
        let written = from.image.content.as_str();
        let leading = written.len() - written.trim_start().len();
        let base_image = written.trim();
        let image_start = from.image.span.start + leading;

        Self {
            stage_index,
            node_index,
            line_num: line_of(code, from.span.start),
            base_image: base_image.to_string(),
            image_start,
            image_end: image_start + base_image.len(),
            name: from.alias.as_ref().map(|alias| alias.content.trim().to_string()),
            platform: from
                .flags
                .iter()
                .find(|flag| flag.name.content.eq_ignore_ascii_case("platform"))
                .map(|flag| flag.value.content.clone()),
        }
    }

    /// 0-based position of this stage among all stages
    ///
    /// ```text
    /// FROM node:20 AS build    (index 0)
    /// FROM node:20-alpine      (index 1)
    /// ```
    pub fn index(&self) -> usize {
        self.stage_index
    }

    /// Position of the FROM instruction in the instruction sequence
    pub fn node_index(&self) -> usize {
        self.node_index
    }

    /// 1-based line the stage is declared on
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Base image text exactly as written after FROM
    pub fn base_image_text(&self) -> &str {
        &self.base_image
    }

    pub fn base_image(&self) -> Result<ImageRef> {
        ImageRef::parse(&self.base_image)
    }

    pub(crate) fn image_span(&self) -> (usize, usize) {
        (self.image_start, self.image_end)
    }

    /// Stage name given with `AS`, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }
}
