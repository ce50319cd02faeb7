use crate::optimization::domain::{Dockerfile, Dockerignore, PackageJson};
use crate::ports::outbound::ProjectDirectory;

/// OptimizeRequest - Input of one optimization run
///
/// All artifacts are already loaded and parsed; the use case never touches
/// the file system itself.
pub struct OptimizeRequest {
    pub dockerfile: Dockerfile,
    pub dockerignore: Dockerignore,
    /// Absent when the project has no package.json
    pub package_json: Option<PackageJson>,
    /// Restricted view handed to the advisory service
    pub project_directory: Box<dyn ProjectDirectory>,
    /// Added to the baseline .dockerignore entries
    pub extra_dockerignore_entries: Vec<String>,
}

impl OptimizeRequest {
    pub fn new(
        dockerfile: Dockerfile,
        dockerignore: Dockerignore,
        package_json: Option<PackageJson>,
        project_directory: Box<dyn ProjectDirectory>,
    ) -> Self {
        Self {
            dockerfile,
            dockerignore,
            package_json,
            project_directory,
            extra_dockerignore_entries: Vec::new(),
        }
    }

    pub fn with_extra_dockerignore_entries(mut self, entries: Vec<String>) -> Self {
        self.extra_dockerignore_entries = entries;
        self
    }
}
