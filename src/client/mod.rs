//! Jenkins client and resource facades
//!
//! [`Jenkins`] owns a [`Transport`] and hands out one facade per resource
//! family. Every facade method issues a fixed, small number of sequential
//! requests and returns a [`Result`]; nothing is cached or retried.

mod build;
mod job;
mod node;
mod queue;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::infrastructure::{Config, ConfigError};
use crate::protocol::builder::{self, QueryOptions, Target};
use crate::protocol::{Body, Error, GetOptions, Operation, Result, outcome};
use crate::transport::{ReqwestTransport, Request, Response, Transport};

pub use build::Builds;
pub use job::Jobs;
pub use node::{NodeState, NodeTransition, Nodes};
pub use queue::Queue;

/// Client for a single Jenkins server
///
/// # Example
///
/// ```no_run
/// use rustline_jenkins::{BuildOptions, Jenkins};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let jenkins = Jenkins::new("http://localhost:8080")?;
///
/// let queue_id = jenkins
///     .job()
///     .build("deploy", &BuildOptions::new().parameter("env", "staging"))
///     .await?;
/// println!("queued as {queue_id}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Jenkins {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Jenkins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jenkins").finish_non_exhaustive()
    }
}

impl Jenkins {
    /// Creates a client for `base_url` using the reqwest transport
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> std::result::Result<Self, crate::transport::TransportError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new(base_url)?)))
    }

    /// Creates a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Creates a client over any transport
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Job operations
    #[must_use]
    pub fn job(&self) -> Jobs<'_> {
        Jobs::new(self)
    }

    /// Build operations
    #[must_use]
    pub fn build(&self) -> Builds<'_> {
        Builds::new(self)
    }

    /// Node operations
    #[must_use]
    pub fn node(&self) -> Nodes<'_> {
        Nodes::new(self)
    }

    /// Queue operations
    #[must_use]
    pub fn queue(&self) -> Queue<'_> {
        Queue::new(self)
    }

    /// Reads server information from `/api/json`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn info(&self, get: &GetOptions) -> Result<Value> {
        let op = Operation::SERVER_INFO;
        let response = self.call(&op, &[], options(*get)).await?;
        outcome::json(&op, &[], &response)
    }

    /// Builds the target of `op` and sends it without a body, whatever its method
    pub(crate) async fn call(
        &self,
        op: &Operation,
        identifiers: &[&str],
        options: QueryOptions<'_>,
    ) -> Result<Response> {
        let target = builder::build(op, identifiers, &options);
        self.dispatch(op, target, None).await
    }

    /// Sends one request for `op`, normalizing transport failures
    pub(crate) async fn dispatch(
        &self,
        op: &Operation,
        target: Target,
        body: Option<Body>,
    ) -> Result<Response> {
        let scope = op.scope();
        debug!(%scope, method = %op.method, path = %target.path, "sending request");

        let request = Request {
            method: op.method,
            path: target.path,
            query: target.query,
            body,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| Error::transport(scope, source))?;

        debug!(%scope, status = response.status, "received response");
        Ok(response)
    }
}

/// Query options carrying only a depth
pub(crate) fn options(get: GetOptions) -> QueryOptions<'static> {
    QueryOptions {
        depth: Some(get.depth),
        ..QueryOptions::default()
    }
}
