/// Result alias used across every layer; typed failures travel as
/// `ShrinkError` inside `anyhow::Error` and are recovered with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
