//! Bearer token authentication

use crate::error::{Error, Result};
use reqwest::blocking::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use std::fmt;

/// Bearer token credentials attached to outgoing requests
///
/// Two values are equal when their tokens are equal. The token is never
/// printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct BitbucketAuth {
    token: String,
}

impl BitbucketAuth {
    /// Create authentication from an optional token
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when no token is supplied
    ///
    /// # Example
    /// ```rust
    /// use bitbucket_api::BitbucketAuth;
    ///
    /// let auth = BitbucketAuth::new(Some("secret".to_string())).unwrap();
    /// assert_eq!(auth.token(), "secret");
    /// assert!(BitbucketAuth::new(None).is_err());
    /// ```
    pub fn new(token: Option<String>) -> Result<Self> {
        token
            .map(Self::bearer)
            .ok_or_else(|| Error::Configuration("Need token for authentication".to_string()))
    }

    /// Create authentication from a token that is known to be present
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Attach the `Authorization` header to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header_value())
    }
}

impl fmt::Debug for BitbucketAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitbucketAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_token_is_configuration_error() {
        let err = BitbucketAuth::new(None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_header_value() {
        let auth = BitbucketAuth::bearer("tok");
        assert_eq!(auth.header_value(), "Bearer tok");
    }

    #[test]
    fn test_equality_by_token() {
        assert_eq!(BitbucketAuth::bearer("a"), BitbucketAuth::bearer("a"));
        assert_ne!(BitbucketAuth::bearer("a"), BitbucketAuth::bearer("b"));
        assert_eq!(
            BitbucketAuth::new(Some("a".to_string())).unwrap(),
            BitbucketAuth::bearer("a")
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let auth = BitbucketAuth::bearer("super-secret");
        let printed = format!("{auth:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("redacted"));
    }

    #[test]
    fn test_apply_sets_authorization_header() {
        let client = reqwest::blocking::Client::new();
        let request = BitbucketAuth::bearer("tok")
            .apply(client.get("http://localhost/"))
            .build()
            .unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer tok");
    }
}
