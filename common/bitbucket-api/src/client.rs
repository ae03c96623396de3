//! Bitbucket client implementation
//!
//! This module provides the `BitbucketClient` struct which is the entry point
//! for all API operations. The client owns the HTTP session and the current
//! authentication state. Request dispatch, pagination and pull requests live
//! in their own modules and extend the client with `impl` blocks.

use crate::auth::BitbucketAuth;
use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::error::{Error, Result};
use crate::request::{DiagnosticSink, TracingSink};
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;

/// Connect and read timeouts applied to requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Time allowed to establish a connection (applies to the whole session)
    pub connect: Duration,
    /// Time allowed for a request once dispatched (per request default)
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: DEFAULT_CONNECT_TIMEOUT,
            read: DEFAULT_READ_TIMEOUT,
        }
    }
}

/// Settings used to construct a [`BitbucketClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub version: String,
    pub token: Option<String>,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            version: DEFAULT_API_VERSION.to_string(),
            token: None,
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

/// Bitbucket API client
///
/// A client is either logged out (no token) or logged in (token attached).
/// The only transition is [`BitbucketClient::login`] with a token. The HTTP
/// session is released when the client is closed or dropped.
///
/// ## Example
///
/// ```rust,no_run
/// use bitbucket_api::{BitbucketClient, ClientConfig, PullRequestParams};
///
/// # fn example() -> bitbucket_api::Result<()> {
/// let config = ClientConfig::new("https://bitbucket.example.com/rest/api").with_token("token");
/// let client = BitbucketClient::new(config)?;
///
/// let pr = client.create_pull_request(PullRequestParams::new(
///     "PROJ", "service", "feature/login", "main", "Add login", "Adds the login flow",
/// ))?;
/// println!("Created PR {}", pr["id"]);
/// client.close();
/// # Ok(())
/// # }
/// ```
pub struct BitbucketClient {
    pub(crate) client: Client,
    pub(crate) auth: Option<BitbucketAuth>,
    pub(crate) timeouts: Timeouts,
    pub(crate) diagnostics: Arc<dyn DiagnosticSink>,
    url: String,
    version: String,
}

impl BitbucketClient {
    /// Create a new client and log in with the configured token, if any
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the base URL or version is empty,
    /// or if the HTTP session cannot be created
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::Configuration("Base URL is not set".to_string()));
        }
        if config.version.trim().is_empty() {
            return Err(Error::Configuration("API version is not set".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {e}")))?;

        let mut bitbucket = Self {
            client,
            auth: None,
            timeouts: config.timeouts,
            diagnostics: Arc::new(TracingSink),
            url: format!("{}/{}", base_url, config.version),
            version: config.version,
        };
        bitbucket.login(config.token);
        Ok(bitbucket)
    }

    /// Replace the sink that receives diagnostics for non-2xx responses
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Log in with a token
    ///
    /// A `None` token is a no-op: a logged-out client stays logged out and a
    /// logged-in client keeps its current token.
    pub fn login(&mut self, token: Option<String>) {
        if let Some(token) = token {
            tracing::debug!(url = %self.url, "logging in with bearer token");
            self.auth = Some(BitbucketAuth::bearer(token));
        }
    }

    /// Whether a token is attached
    pub fn logged_in(&self) -> bool {
        self.auth.is_some()
    }

    /// The current token, if logged in
    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.token())
    }

    /// The current authentication, if logged in
    pub fn auth(&self) -> Option<&BitbucketAuth> {
        self.auth.as_ref()
    }

    /// The API root: base URL followed by the version segment
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Build an absolute URL for a path below the API root
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }

    /// Close the client and release its HTTP session
    pub fn close(self) {
        tracing::debug!(url = %self.url, "closing session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_base_url() {
        let result = BitbucketClient::new(ClientConfig::new("  "));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_new_requires_version() {
        let result = BitbucketClient::new(ClientConfig::new("https://host").with_version(""));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_url_joins_base_and_version() {
        let client = BitbucketClient::new(ClientConfig::new("https://host/rest/api/")).unwrap();
        assert_eq!(client.url(), "https://host/rest/api/1.0");
        assert_eq!(client.version(), "1.0");
        assert_eq!(
            client.api_url("/projects/P/repos"),
            "https://host/rest/api/1.0/projects/P/repos"
        );
    }

    #[test]
    fn test_custom_version() {
        let client =
            BitbucketClient::new(ClientConfig::new("https://host").with_version("latest")).unwrap();
        assert_eq!(client.url(), "https://host/latest");
    }

    #[test]
    fn test_login_state_transitions() {
        let mut client = BitbucketClient::new(ClientConfig::new("https://host")).unwrap();
        assert!(!client.logged_in());
        assert!(client.token().is_none());

        client.login(None);
        assert!(!client.logged_in());

        client.login(Some("tok".to_string()));
        assert!(client.logged_in());
        assert_eq!(client.token(), Some("tok"));
        assert_eq!(client.auth(), Some(&BitbucketAuth::bearer("tok")));

        client.login(None);
        assert_eq!(client.token(), Some("tok"));
    }

    #[test]
    fn test_constructor_logs_in_with_token() {
        let client = BitbucketClient::new(ClientConfig::new("https://host").with_token("abc")).unwrap();
        assert!(client.logged_in());
        assert_eq!(client.token(), Some("abc"));
    }

    #[test]
    fn test_default_timeouts() {
        let client = BitbucketClient::new(ClientConfig::new("https://host")).unwrap();
        assert_eq!(client.timeouts().connect, Duration::from_secs(5));
        assert_eq!(client.timeouts().read, Duration::from_secs(15));
    }
}
