//! Bitbucket - A CLI tool for the Bitbucket Server REST API

pub mod commands;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod logging;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use commands::{Command, CommandContext};
pub use config::{Config, ConfigOverrides};

