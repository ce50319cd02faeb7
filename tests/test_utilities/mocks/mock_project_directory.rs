use dockershrink::prelude::*;
use std::collections::HashMap;

/// Mock ProjectDirectory serving files from memory
#[derive(Default)]
pub struct MockProjectDirectory {
    files: HashMap<String, String>,
}

impl MockProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }
}

impl ProjectDirectory for MockProjectDirectory {
    fn read_file(&self, path: &str) -> Result<String> {
        match self.files.get(path) {
            Some(contents) => Ok(contents.clone()),
            None => anyhow::bail!("Mock file not found: {}", path),
        }
    }

    fn list_directory(&self, _path: &str) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.files.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
