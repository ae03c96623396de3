//! Configuration file loading
//!
//! Settings are resolved in three layers, later layers winning:
//! an optional YAML file, the process environment, then command line flags.

use super::validation;
use crate::constants::config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};
use crate::constants::env;
use anyhow::{Context, Result};
use bitbucket_api::constants::DEFAULT_API_VERSION;
use bitbucket_api::{ClientConfig, Timeouts};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_read_timeout() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Base URL of the REST API
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            version: default_version(),
            token: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{path}'"))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{path}'"))?;

        Ok(config)
    }

    /// Load configuration from a file if it exists, defaults otherwise
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::debug!(path, "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overlay values taken from the environment
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env::URL) {
            self.url = url;
        }
        if let Some(token) = lookup(env::TOKEN) {
            self.token = Some(token);
        }
        if let Some(version) = lookup(env::API_VERSION) {
            self.version = version;
        }
    }

    /// Overlay values given on the command line
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.url {
            self.url = url.clone();
        }
        if let Some(token) = &overrides.token {
            self.token = Some(token.clone());
        }
    }

    /// Resolve file, environment and command line into a validated configuration
    pub fn resolve(path: &str, overrides: &ConfigOverrides) -> Result<Self> {
        Self::resolve_with(path, overrides, |key| std::env::var(key).ok())
    }

    /// Like [`Config::resolve`] with an explicit environment lookup
    pub fn resolve_with<F>(path: &str, overrides: &ConfigOverrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_or_default(path)?;
        config.apply_env(lookup);
        config.apply_overrides(overrides);

        validation::validate_config(&config).map_err(validation::validation_errors_to_anyhow)?;

        Ok(config)
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
        }
    }

    /// Settings for the API client
    pub fn to_client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.url.clone())
            .with_version(self.version.clone())
            .with_timeouts(self.timeouts());

        match &self.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}
