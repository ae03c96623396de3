//! Configuration validation
//!
//! Validation collects every problem instead of stopping at the first.

use super::Config;
use crate::constants::env;
use anyhow::anyhow;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No base URL was configured
    MissingUrl,
    /// Base URL is not an http(s) URL
    InvalidUrl(String),
    /// API version is empty
    EmptyVersion,
    /// A timeout is zero
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingUrl => {
                write!(f, "{} is not set.", env::URL)
            }
            ValidationError::InvalidUrl(url) => {
                write!(f, "Base URL must start with http:// or https://: '{}'", url)
            }
            ValidationError::EmptyVersion => {
                write!(f, "API version cannot be empty")
            }
            ValidationError::ZeroTimeout(name) => {
                write!(f, "Timeout '{}' must be greater than zero", name)
            }
        }
    }
}

/// Validate a resolved configuration
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let url = config.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::MissingUrl);
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ValidationError::InvalidUrl(config.url.clone()));
    }

    if config.version.trim().is_empty() {
        errors.push(ValidationError::EmptyVersion);
    }

    if config.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_timeout_secs"));
    }
    if config.read_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("read_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Convert a list of validation errors into a single error
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow!("Invalid configuration: {}", messages.join("; "))
}
