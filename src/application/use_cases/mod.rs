/// Use cases module containing application business logic orchestration
mod optimize_image;

pub use optimize_image::OptimizeImageUseCase;
