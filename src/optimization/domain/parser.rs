//! Structural parsing of Dockerfiles on top of `dockerfile-parser`.
//!
//! The crate builds the instruction list; this module maps its errors into
//! `ShrinkError::Parse` and rejects instruction keywords Docker itself would
//! refuse, which the crate otherwise accepts as miscellaneous instructions.

use crate::shared::error::ShrinkError;
use crate::shared::Result;
use dockerfile_parser::{Dockerfile as ParsedDockerfile, Instruction};

/// Keywords the crate parses into a typed instruction. Seeing one of them as
/// a miscellaneous instruction means its arguments did not parse.
const TYPED_INSTRUCTIONS: &[&str] = &[
    "ARG",
    "CMD",
    "COPY",
    "ENTRYPOINT",
    "ENV",
    "FROM",
    "LABEL",
    "RUN",
];

const OTHER_INSTRUCTIONS: &[&str] = &[
    "ADD",
    "EXPOSE",
    "HEALTHCHECK",
    "MAINTAINER",
    "ONBUILD",
    "SHELL",
    "STOPSIGNAL",
    "USER",
    "VOLUME",
    "WORKDIR",
];

/// Parses Dockerfile source into the crate's instruction list.
///
/// # Errors
/// Returns `ShrinkError::Parse` when the grammar rejects the text, there is no
/// instruction at all, a keyword is unknown or lacks arguments, or a FROM
/// instruction has no usable image.
pub fn parse(code: &str) -> Result<ParsedDockerfile> {
    let parsed = ParsedDockerfile::parse(code).map_err(|e| ShrinkError::parse(e.to_string()))?;

    if parsed.instructions.is_empty() {
        return Err(ShrinkError::parse("file with no instructions").into());
    }

    for instruction in &parsed.instructions {
        let Instruction::Misc(misc) = instruction else {
            continue;
        };
        let line = line_of(code, misc.span.start);
        let text = code.get(misc.span.start..misc.span.end).unwrap_or_default();
        let (keyword, arguments) = text
            .trim_start()
            .split_once(char::is_whitespace)
            .unwrap_or((text.trim(), ""));
        let keyword = keyword.to_ascii_uppercase();

        if keyword == "FROM" {
            return Err(ShrinkError::parse(format!(
                "line {}: FROM requires an image (FROM [--flags] image [AS name])",
                line
            ))
            .into());
        }
        if !TYPED_INSTRUCTIONS.contains(&keyword.as_str())
            && !OTHER_INSTRUCTIONS.contains(&keyword.as_str())
        {
            return Err(ShrinkError::parse(format!(
                "line {}: unknown instruction: {}",
                line, keyword
            ))
            .into());
        }
        if arguments.trim().is_empty() {
            return Err(ShrinkError::parse(format!(
                "line {}: {} requires at least one argument",
                line, keyword
            ))
            .into());
        }
    }

    Ok(parsed)
}

/// 1-based line holding byte `offset`
pub(crate) fn line_of(code: &str, offset: usize) -> usize {
    code.get(..offset)
        .map(|prefix| prefix.matches('\n').count() + 1)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(code: &str) -> String {
        let err = parse(code).unwrap_err();
        match err.downcast_ref::<ShrinkError>() {
            Some(ShrinkError::Parse { details }) => details.clone(),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_instructions() {
        let parsed = parse("FROM node:20\nWORKDIR /app\nRUN npm ci\nCMD [\"node\", \"index.js\"]\n")
            .unwrap();
        assert_eq!(parsed.instructions.len(), 4);
        assert!(matches!(parsed.instructions[0], Instruction::From(_)));
        assert!(matches!(parsed.instructions[2], Instruction::Run(_)));
    }

    #[test]
    fn test_unknown_instruction() {
        let details = details("FROM node:20\nFORM node\n");
        assert!(details.contains("line 2"), "{}", details);
        assert!(details.contains("unknown instruction: FORM"), "{}", details);
    }

    #[test]
    fn test_lowercase_keywords_are_known() {
        assert!(parse("from node:20\nworkdir /app\nexpose 3000\n").is_ok());
    }

    #[test]
    fn test_comments_only() {
        let details = details("# syntax=docker/dockerfile:1\n# nothing else\n");
        assert!(details.contains("no instructions"), "{}", details);
    }

    #[test]
    fn test_grammar_error() {
        assert!(parse("FROM node:20\n\"oops\"\n").is_err());
    }

    #[test]
    fn test_shift_operators_are_not_heredocs() {
        let code = "FROM node:20 AS build\nRUN echo $((1<<2))\nRUN python -c \"print(1<<x)\"\nFROM node:20\nCMD node\n";
        let parsed = parse(code).unwrap();
        assert_eq!(parsed.instructions.len(), 5);
    }

    #[test]
    fn test_line_of() {
        let code = "a\nbb\nccc";
        assert_eq!(line_of(code, 0), 1);
        assert_eq!(line_of(code, 2), 2);
        assert_eq!(line_of(code, 5), 3);
        assert_eq!(line_of(code, 100), 1);
    }
}
