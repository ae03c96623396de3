//! Error types for Bitbucket API operations

use thiserror::Error;

/// Result type for Bitbucket API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bitbucket API error types
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request exceeded its connect or read timeout
    #[error("Connection timeout. Request failed: {0}")]
    Timeout(String),

    /// Any other transport failure, including addresses that cannot be requested
    #[error("Connection error. Request failed: {0}")]
    Connection(String),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// A response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Map a transport error from reqwest onto the error taxonomy
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let message = cause_chain(&err);
        if err.is_timeout() {
            Error::Timeout(message)
        } else {
            Error::Connection(message)
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Join an error and all of its sources into one message
fn cause_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        let err = Error::HttpStatus {
            status: 409,
            body: "conflict".to_string(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(Error::Timeout("slow".to_string()).status(), None);
    }

    #[test]
    fn test_display_includes_cause() {
        let err = Error::Connection("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));

        let err = Error::HttpStatus {
            status: 404,
            body: "{\"errors\":[]}".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: {\"errors\":[]}");
    }

    #[test]
    fn test_cause_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let outer = Error::Decode(serde_json::from_str::<u32>("x").unwrap_err());
        assert_eq!(cause_chain(&inner), "Connection refused");
        assert!(cause_chain(&outer).starts_with("Failed to decode response"));
    }

    #[test]
    fn test_builder_failure_maps_to_connection() {
        let err = reqwest::blocking::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        assert!(err.is_builder());

        match Error::from_transport(err) {
            Error::Connection(message) => assert!(message.contains("builder error"), "{message}"),
            other => panic!("expected Connection error, got {other:?}"),
        }
    }
}
