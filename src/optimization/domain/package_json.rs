use crate::shared::error::ShrinkError;
use crate::shared::Result;

/// PackageJson holds the project's `package.json` verbatim
///
/// Only the top-level shape is checked; fields are never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageJson {
    raw_data: String,
}

impl PackageJson {
    /// # Errors
    /// Returns `ShrinkError::Validation` if the text is not a JSON object.
    pub fn new(contents: impl Into<String>) -> Result<Self> {
        let raw_data = contents.into();
        let value: serde_json::Value =
            serde_json::from_str(&raw_data).map_err(|e| ShrinkError::Validation {
                message: format!("package.json is not valid JSON: {}", e),
            })?;
        if !value.is_object() {
            return Err(ShrinkError::Validation {
                message: "package.json must contain a JSON object at the top level".to_string(),
            }
            .into());
        }
        Ok(Self { raw_data })
    }

    pub fn raw(&self) -> &str {
        &self.raw_data
    }
}
