//! reqwest-backed transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client as HttpClient, header::CONTENT_TYPE};
use url::Url;

use super::{Request, Response, Transport, TransportError};
use crate::infrastructure::Config;
use crate::protocol::Method;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP transport over `reqwest` with redirects disabled
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: Url,
    http: HttpClient,
    credentials: Option<(String, String)>,
}

impl ReqwestTransport {
    /// Creates a transport for `base_url` with the default timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)?;
        let http = HttpClient::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url,
            http,
            credentials: None,
        })
    }

    /// Creates a transport from application configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = Self::with_timeout(&config.base_url, config.timeout())?;

        Ok(match config.credentials() {
            Some((user, token)) => transport.with_credentials(user, token),
            None => transport,
        })
    }

    /// Attaches basic auth credentials to every request
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), token.into()));
        self
    }

    /// Base URL of the server
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins the base URL, which may carry a context path, with `path` and `query`
    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}"))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.url(&request.path, &request.query)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Head => reqwest::Method::HEAD,
        };

        let mut builder = self.http.request(method, url);

        if let Some((user, token)) = &self.credentials {
            builder = builder.basic_auth(user, Some(token));
        }

        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.bytes);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
