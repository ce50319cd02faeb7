pub mod dockerfile;
pub mod dockerignore;
pub mod image;
pub mod optimization_action;
pub mod package_json;
pub(crate) mod parser;
pub mod run_metadata;
pub mod stage;

pub use dockerfile::Dockerfile;
pub use dockerignore::Dockerignore;
pub use image::ImageRef;
pub use optimization_action::OptimizationAction;
pub use package_json::PackageJson;
pub use run_metadata::RunMetadata;
pub use stage::Stage;
