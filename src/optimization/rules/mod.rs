/// Optimization rules - pure policies deciding what to change
pub mod dockerignore_baseline;
pub mod final_stage_light_base_image;

pub use dockerignore_baseline::DockerignoreBaseline;
pub use final_stage_light_base_image::{FinalStageLightBaseImage, LightBaseImageDecision};
