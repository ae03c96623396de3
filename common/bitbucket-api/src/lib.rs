//! Bitbucket Server REST API client library
//!
//! This library provides a small blocking client for a Bitbucket Server style
//! REST API: bearer token authentication, a generic request dispatcher,
//! paginated result iteration and pull request creation.
//!
//! ## Modules
//!
//! - [`auth`]: Bearer token authentication
//! - [`client`]: Core client, session state and configuration
//! - [`error`]: Typed error taxonomy
//! - [`pagination`]: Lazy iteration over paginated endpoints
//! - [`pull_requests`]: Pull request creation
//! - [`request`]: Request options, dispatch and diagnostics
//! - [`url_parts`]: URL / query string splitting

pub mod auth;
pub mod client;
pub mod error;
pub mod pagination;
pub mod pull_requests;
pub mod request;
pub mod url_parts;

// Re-export public API
pub use auth::BitbucketAuth;
pub use client::{BitbucketClient, ClientConfig, Timeouts};
pub use error::{Error, Result};
pub use pagination::{Page, PageIterator};
pub use pull_requests::PullRequestParams;
pub use request::{AuthMode, DiagnosticSink, HttpDiagnostic, RequestOptions, TracingSink};
pub use url_parts::split_url;

/// Default values shared by the client
pub mod constants {
    use std::time::Duration;

    /// Default API version segment appended to the base URL
    pub const DEFAULT_API_VERSION: &str = "1.0";

    /// Default time allowed to establish a connection
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default time allowed for a request once connected
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);

    /// Content type sent with every request unless overridden
    pub const JSON_CONTENT_TYPE: &str = "application/json";

    /// Default User-Agent header for API requests
    pub const DEFAULT_USER_AGENT: &str = concat!("bitbucket-api/", env!("CARGO_PKG_VERSION"));
}
