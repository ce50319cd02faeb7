/// Dockerignore represents the project's `.dockerignore` file
///
/// `None` contents means the file does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerignore {
    raw_data: Option<String>,
}

impl Dockerignore {
    pub fn new(contents: Option<String>) -> Self {
        Self { raw_data: contents }
    }

    pub fn exists(&self) -> bool {
        self.raw_data.is_some()
    }

    /// Creates an empty file; existing contents are kept.
    pub fn create(&mut self) {
        if self.raw_data.is_none() {
            self.raw_data = Some(String::new());
        }
    }

    /// Appends every entry not already present and returns the ones added,
    /// in input order.
    ///
    /// Entries are compared after normalisation (surrounding whitespace, a
    /// leading `/` or `./` and a trailing `/` are ignored) so `node_modules/`
    /// already covers `node_modules`. Comment lines never match. Calling this
    /// twice with the same entries adds nothing the second time.
    pub fn add_if_not_present<S: AsRef<str>>(&mut self, entries: &[S]) -> Vec<String> {
        let mut present: Vec<String> = self.entries().map(normalize).collect();
        let mut added = Vec::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let key = normalize(entry);
            if present.contains(&key) {
                continue;
            }
            present.push(key);
            added.push(entry.to_string());
        }

        if !added.is_empty() {
            let raw = self.raw_data.get_or_insert_with(String::new);
            if !raw.is_empty() && !raw.ends_with('\n') {
                raw.push('\n');
            }
            for entry in &added {
                raw.push_str(entry);
                raw.push('\n');
            }
        }

        added
    }

    /// Non-comment, non-blank lines
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.raw()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
    }

    /// Current contents; empty when the file does not exist
    pub fn raw(&self) -> &str {
        self.raw_data.as_deref().unwrap_or_default()
    }
}

fn normalize(entry: &str) -> String {
    let entry = entry.trim();
    let entry = entry.strip_prefix("./").unwrap_or(entry);
    let entry = entry.strip_prefix('/').unwrap_or(entry);
    entry.strip_suffix('/').unwrap_or(entry).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASELINE: [&str; 3] = ["node_modules", "npm-debug.log", ".git"];

    #[test]
    fn test_missing_file() {
        let mut ignore = Dockerignore::new(None);
        assert!(!ignore.exists());
        assert_eq!(ignore.raw(), "");

        ignore.create();
        assert!(ignore.exists());
        assert_eq!(ignore.raw(), "");
    }

    #[test]
    fn test_create_keeps_existing_contents() {
        let mut ignore = Dockerignore::new(Some("dist\n".to_string()));
        ignore.create();
        assert_eq!(ignore.raw(), "dist\n");
    }

    #[test]
    fn test_add_reports_only_new_entries() {
        let mut ignore = Dockerignore::new(Some("# deps\n/node_modules/\n*.md".to_string()));
        let added = ignore.add_if_not_present(&BASELINE);
        assert_eq!(added, vec!["npm-debug.log", ".git"]);
        assert_eq!(
            ignore.raw(),
            "# deps\n/node_modules/\n*.md\nnpm-debug.log\n.git\n"
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut ignore = Dockerignore::new(Some(String::new()));
        let first = ignore.add_if_not_present(&BASELINE);
        assert_eq!(first.len(), 3);
        let after_first = ignore.raw().to_string();

        let second = ignore.add_if_not_present(&BASELINE);
        assert!(second.is_empty());
        assert_eq!(ignore.raw(), after_first);
    }

    #[test]
    fn test_add_dedupes_input() {
        let mut ignore = Dockerignore::new(Some(String::new()));
        let added = ignore.add_if_not_present(&[".git", "./.git", " .git/ "]);
        assert_eq!(added, vec![".git"]);
        assert_eq!(ignore.raw(), ".git\n");
    }

    #[test]
    fn test_commented_entry_does_not_count() {
        let mut ignore = Dockerignore::new(Some("# .git\n".to_string()));
        let added = ignore.add_if_not_present(&[".git"]);
        assert_eq!(added, vec![".git"]);
    }

    #[test]
    fn test_add_without_create_creates_file() {
        let mut ignore = Dockerignore::new(None);
        ignore.add_if_not_present(&["node_modules"]);
        assert!(ignore.exists());
        assert_eq!(ignore.raw(), "node_modules\n");
    }

    #[test]
    fn test_entries_iterator() {
        let ignore = Dockerignore::new(Some("a\n\n# c\n  b  \n".to_string()));
        let entries: Vec<&str> = ignore.entries().collect();
        assert_eq!(entries, vec!["a", "b"]);
    }
}
