//! Request dispatch
//!
//! Every API call goes through [`BitbucketClient::request`], which applies the
//! default timeout, authentication and content type, folds query parameters
//! embedded in the address into the explicit parameters, and maps failures
//! onto [`Error`].

use crate::auth::BitbucketAuth;
use crate::client::BitbucketClient;
use crate::constants::JSON_CONTENT_TYPE;
use crate::error::{Error, Result};
use crate::url_parts::split_url;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::Response;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Which credentials a request is sent with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// The client's current authentication, if logged in
    #[default]
    Session,
    /// No `Authorization` header
    Anonymous,
    /// A specific token for this request only
    Token(BitbucketAuth),
}

/// Per-request overrides
///
/// Anything left unset falls back to the client defaults: the configured read
/// timeout, the session credentials and a JSON content type.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub auth: AuthMode,
    pub headers: HeaderMap,
    pub params: BTreeMap<String, String>,
    pub json: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }
}

/// Details of a non-2xx response, handed to a [`DiagnosticSink`]
#[derive(Debug, Clone)]
pub struct HttpDiagnostic {
    pub method: Method,
    pub url: String,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Receives diagnostics for responses with a non-2xx status
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &HttpDiagnostic);
}

/// Default sink: logs the failed response through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &HttpDiagnostic) {
        tracing::warn!(
            method = %diagnostic.method,
            url = %diagnostic.url,
            status = diagnostic.status.as_u16(),
            headers = ?diagnostic.headers,
            body = %diagnostic.body,
            "request failed"
        );
    }
}

impl BitbucketClient {
    /// Send a single request
    ///
    /// # Errors
    /// - [`Error::Timeout`] if the connect or read timeout elapses
    /// - [`Error::Connection`] for any other transport failure, including an
    ///   address that cannot be parsed
    /// - [`Error::HttpStatus`] if the server answers with a non-2xx status
    pub fn request(&self, method: Method, address: &str, options: RequestOptions) -> Result<Response> {
        let RequestOptions {
            timeout,
            auth,
            mut headers,
            params,
            json,
        } = options;

        let (url, mut query) = split_url(address);
        query.extend(params);

        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        let mut request = self
            .client
            .request(method.clone(), &url)
            .timeout(timeout.unwrap_or(self.timeouts.read))
            .headers(headers)
            .query(&query);

        request = match &auth {
            AuthMode::Session => match &self.auth {
                Some(auth) => auth.apply(request),
                None => request,
            },
            AuthMode::Anonymous => request,
            AuthMode::Token(auth) => auth.apply(request),
        };

        if let Some(body) = &json {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, params = query.len(), "sending request");
        let response = request.send().map_err(Error::from_transport)?;

        let status = response.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "received response");
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().unwrap_or_else(|e| {
            tracing::debug!(%method, %url, error = %e, "failed to read error response body");
            format!("<failed to read response body: {e}>")
        });
        self.diagnostics.report(&HttpDiagnostic {
            method,
            url,
            status,
            headers,
            body: body.clone(),
        });

        Err(Error::HttpStatus {
            status: status.as_u16(),
            body,
        })
    }

    pub fn get(&self, address: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::GET, address, options)
    }

    pub fn post(&self, address: &str, json: Option<Value>, options: RequestOptions) -> Result<Response> {
        self.request(Method::POST, address, with_body(options, json))
    }

    pub fn put(&self, address: &str, json: Option<Value>, options: RequestOptions) -> Result<Response> {
        self.request(Method::PUT, address, with_body(options, json))
    }

    pub fn patch(&self, address: &str, json: Value, options: RequestOptions) -> Result<Response> {
        self.request(Method::PATCH, address, options.json(json))
    }

    pub fn delete(&self, address: &str, options: RequestOptions) -> Result<Response> {
        self.request(Method::DELETE, address, options)
    }
}

fn with_body(options: RequestOptions, json: Option<Value>) -> RequestOptions {
    match json {
        Some(body) => options.json(body),
        None => options,
    }
}

/// Decode a JSON response body
pub(crate) fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().map_err(Error::from_transport)?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = RequestOptions::new()
            .timeout(Duration::from_secs(1))
            .param("limit", "10")
            .param("limit", "20")
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .json(serde_json::json!({"a": 1}));

        assert_eq!(options.timeout, Some(Duration::from_secs(1)));
        assert_eq!(options.params["limit"], "20");
        assert_eq!(options.headers[CONTENT_TYPE], "text/plain");
        assert_eq!(options.auth, AuthMode::Session);
        assert!(options.json.is_some());
    }

    #[test]
    fn test_with_body_keeps_existing_when_none() {
        let options = with_body(RequestOptions::new().json(serde_json::json!(1)), None);
        assert_eq!(options.json, Some(serde_json::json!(1)));
    }
}
