use crate::optimization::domain::{Dockerignore, OptimizationAction};

pub const CREATE_RULE_ID: &str = "create-dockerignore";
pub const UPDATE_RULE_ID: &str = "update-dockerignore";

/// Entries every Node.js build context should exclude
pub const BASELINE_ENTRIES: [&str; 3] = ["node_modules", "npm-debug.log", ".git"];

/// DockerignoreBaseline policy keeping the build context free of heavy or
/// sensitive directories
pub struct DockerignoreBaseline;

impl DockerignoreBaseline {
    /// Ensures the ignore file exists and holds the baseline entries plus
    /// `extra_entries`
    ///
    /// # Returns
    /// The actions taken, in order: creation first (if the file was missing),
    /// then the update listing exactly the entries that were added.
    pub fn apply<S: AsRef<str>>(
        dockerignore: &mut Dockerignore,
        filename: &str,
        extra_entries: &[S],
    ) -> Vec<OptimizationAction> {
        let mut actions = Vec::new();

        if !dockerignore.exists() {
            dockerignore.create();
            actions.push(OptimizationAction::new(
                CREATE_RULE_ID,
                filename,
                "Created .dockerignore file",
                "Created a new .dockerignore file to exclude unnecessary files & folders from the Docker build context.",
            ));
        }

        let wanted: Vec<&str> = BASELINE_ENTRIES
            .iter()
            .copied()
            .chain(extra_entries.iter().map(AsRef::as_ref))
            .collect();
        let added = dockerignore.add_if_not_present(&wanted);
        if !added.is_empty() {
            actions.push(OptimizationAction::new(
                UPDATE_RULE_ID,
                filename,
                "Updated .dockerignore file",
                format!(
                    "Added the following entries to .dockerignore to exclude them from the Docker build context:\n{}",
                    added.join("\n")
                ),
            ));
        }

        actions
    }
}
