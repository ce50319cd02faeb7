//! dockershrink - reduce the size of Docker images for NodeJS projects
//!
//! This library reads a project's Dockerfile, `.dockerignore` and
//! `package.json`, applies size optimizations and reports every change it
//! made or recommends. It follows hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`optimization`): Dockerfile model, image references and optimization rules
//! - **Application Layer** (`application`): The optimization use case and its DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dockershrink::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let project = Path::new(".");
//! let reader = FileSystemReader::new();
//!
//! let dockerfile = Dockerfile::new(reader.read_dockerfile(&project.join("Dockerfile"))?)?;
//! let dockerignore = Dockerignore::new(reader.read_dockerignore(&project.join(".dockerignore"))?);
//! let request = OptimizeRequest::new(
//!     dockerfile,
//!     dockerignore,
//!     None,
//!     Box::new(RestrictedFilesystem::new(project)?),
//! );
//!
//! // Without an advisory service only the local rules run
//! let use_case = OptimizeImageUseCase::new(
//!     None::<OpenAiAdvisoryService>,
//!     StderrProgressReporter::new(),
//! );
//! let response = use_case.execute(request)?;
//!
//! let report = TextReportFormatter::new(false).format(&response)?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod optimization;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, OutputDirectoryWriter, RestrictedFilesystem, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, TextReportFormatter};
    pub use crate::adapters::outbound::network::{OpenAiAdvisoryService, OpenAiConfig};
    pub use crate::application::dto::{OptimizeRequest, OptimizeResponse, OutputFormat};
    pub use crate::application::use_cases::OptimizeImageUseCase;
    pub use crate::optimization::domain::{
        Dockerfile, Dockerignore, ImageRef, OptimizationAction, PackageJson, RunMetadata, Stage,
    };
    pub use crate::ports::outbound::{
        AdvisoryRequest, AdvisoryResponse, AdvisoryService, ArtifactWriter, OutputPresenter,
        ProgressReporter, ProjectDirectory, ProjectReader, ReportFormatter,
    };
    pub use crate::shared::Result;
}
