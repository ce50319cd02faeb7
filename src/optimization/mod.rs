/// Optimization domain - the Dockerfile model, companion artifacts and the
/// pure rules that decide what to change
pub mod domain;
pub mod rules;
pub mod services;
