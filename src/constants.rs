//! Central constants for the bitbucket application

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "bitbucket.yaml";

    /// Default connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

    /// Default read timeout in seconds
    pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 15;
}

/// Environment variables read at startup
pub mod env {
    /// Base URL of the REST API, e.g. `https://bitbucket.example.com/rest/api`
    pub const URL: &str = "BITBUCKET_URL";

    /// Personal access token used as bearer credentials
    pub const TOKEN: &str = "BITBUCKET_TOKEN";

    /// API version segment
    pub const API_VERSION: &str = "BITBUCKET_API_VERSION";
}

/// Default values for pull request creation
pub mod pr {
    /// Default target branch when none is given
    pub const DEFAULT_TARGET_BRANCH: &str = "main";
}
