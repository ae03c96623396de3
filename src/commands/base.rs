//! Base types and traits for the command pattern

use crate::config::Config;
use crate::diagnostics::ConsoleSink;
use anyhow::{Context, Result};
use bitbucket_api::BitbucketClient;
use std::sync::Arc;

/// Context passed to all commands containing shared configuration and options
#[derive(Clone)]
pub struct CommandContext {
    /// The resolved configuration
    pub config: Config,
    /// Print failed responses to the console
    pub debug: bool,
}

impl CommandContext {
    pub fn new(config: Config, debug: bool) -> Self {
        Self { config, debug }
    }

    /// Create an API client from the configuration
    pub fn client(&self) -> Result<BitbucketClient> {
        let client = BitbucketClient::new(self.config.to_client_config())
            .context("Failed to create Bitbucket client")?;

        if self.debug {
            Ok(client.with_diagnostics(Arc::new(ConsoleSink)))
        } else {
            Ok(client)
        }
    }
}

/// Trait that all commands must implement
pub trait Command {
    /// Execute the command with the given context
    fn execute(&self, context: &CommandContext) -> Result<()>;
}
