//! Configuration management module

pub mod loader;
pub mod validation;

pub use loader::{Config, ConfigOverrides};
pub use validation::ValidationError;
