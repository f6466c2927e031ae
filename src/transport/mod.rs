//! Transport seam
//!
//! The client issues raw [`Request`]s through a [`Transport`] and interprets
//! the raw [`Response`]s itself. Implementations must not follow redirects:
//! several Jenkins endpoints signal success with a bare `302`.

mod http;
#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::protocol::{Body, Method};

pub use http::ReqwestTransport;

/// Connection-level failures
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client failed (DNS, connection refused, timeout)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The base URL and path did not form a valid URL
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Any other transport failure
    #[error("{0}")]
    Other(String),
}

/// Raw request handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Percent-encoded path, relative to the server base URL
    pub path: String,
    /// Query parameters in wire order
    pub query: Vec<(String, String)>,
    /// Optional body
    pub body: Option<Body>,
}

impl Request {
    /// Returns the value of query parameter `key`
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response returned by a transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Headers, keyed by lowercase name
    pub headers: HashMap<String, String>,
    /// Raw body
    pub body: Vec<u8>,
}

impl Response {
    /// Creates an empty response with `status`
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Issues raw HTTP exchanges against a Jenkins server
///
/// Implementations fail only on connection-level errors; every HTTP status,
/// including 4xx, 5xx and 3xx, is returned as a [`Response`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
