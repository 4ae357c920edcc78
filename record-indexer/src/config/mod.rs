//! Configuration loading and dependency wiring.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{values_from_env, values_from_vars};
