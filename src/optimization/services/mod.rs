/// Domain services
mod run_metadata_generator;

pub use run_metadata_generator::RunMetadataGenerator;
