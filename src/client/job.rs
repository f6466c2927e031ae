//! Job operations

use serde_json::Value;

use super::{Jenkins, options};
use crate::protocol::builder::{self, QueryOptions};
use crate::protocol::{Body, BuildOptions, GetOptions, Operation, Result, outcome};

/// Job facade, obtained from [`Jenkins::job`]
#[derive(Debug, Clone, Copy)]
pub struct Jobs<'a> {
    client: &'a Jenkins,
}

impl<'a> Jobs<'a> {
    pub(super) fn new(client: &'a Jenkins) -> Self {
        Self { client }
    }

    /// Queues a build and returns the queue item identifier
    ///
    /// Non-empty parameters target `buildWithParameters`. The returned
    /// identifier is a queue item, not a build number; resolving it is left
    /// to the caller.
    ///
    /// # Errors
    ///
    /// Not found for a missing job, protocol failure when `Location` carries
    /// no identifier.
    pub async fn build(&self, name: &str, options: &BuildOptions) -> Result<u64> {
        let op = Operation::JOB_BUILD;
        let query = QueryOptions {
            token: options.token.as_deref(),
            parameters: &options.parameters,
            ..QueryOptions::default()
        };
        let response = self.client.call(&op, &[name], query).await?;
        let id = outcome::location(&op, &[name], &response)?;

        tracing::info!(job = name, queue_id = id, "build queued");
        Ok(id)
    }

    /// Returns the job's `config.xml`
    ///
    /// # Errors
    ///
    /// Not found for a missing job.
    pub async fn config(&self, name: &str) -> Result<String> {
        let op = Operation::JOB_CONFIG_GET;
        let response = self.client.call(&op, &[name], QueryOptions::default()).await?;
        outcome::text(&op, &[name], &response)
    }

    /// Replaces the job's `config.xml`
    ///
    /// # Errors
    ///
    /// Not found for a missing job, operation failure for any non-2xx status.
    pub async fn set_config(&self, name: &str, xml: &str) -> Result<()> {
        let op = Operation::JOB_CONFIG_SET;
        let target = builder::build(&op, &[name], &QueryOptions::default());
        let response = self.client.dispatch(&op, target, Some(Body::xml(xml))).await?;
        outcome::empty(&op, &[name], &response)
    }

    /// Reads the job's `config.xml`, applies `update` and writes the result back
    ///
    /// # Errors
    ///
    /// Any error of [`Jobs::config`] or [`Jobs::set_config`].
    pub async fn update_config<F>(&self, name: &str, update: F) -> Result<()>
    where
        F: FnOnce(String) -> String,
    {
        let xml = self.config(name).await?;
        self.set_config(name, &update(xml)).await
    }

    /// Copies job `from` to a new job `name`
    ///
    /// # Errors
    ///
    /// Conflict with the server's reason when the copy is rejected.
    pub async fn copy(&self, from: &str, name: &str) -> Result<()> {
        let op = Operation::JOB_COPY;
        let target = builder::build(&op, &[], &QueryOptions::default())
            .with_query("name", name)
            .with_query("mode", "copy")
            .with_query("from", from);
        let response = self.client.dispatch(&op, target, None).await?;
        outcome::empty(&op, &[from], &response)
    }

    /// Creates job `name` from `config.xml`
    ///
    /// # Errors
    ///
    /// Conflict with the server's reason when the job already exists.
    pub async fn create(&self, name: &str, xml: &str) -> Result<()> {
        let op = Operation::JOB_CREATE;
        let target =
            builder::build(&op, &[], &QueryOptions::default()).with_query("name", name);
        let response = self.client.dispatch(&op, target, Some(Body::xml(xml))).await?;
        outcome::empty(&op, &[name], &response)
    }

    /// Deletes the job
    ///
    /// # Errors
    ///
    /// Operation failure `"failed to delete: <name>"` when Jenkins answers
    /// `200` instead of redirecting.
    pub async fn destroy(&self, name: &str) -> Result<()> {
        let op = Operation::JOB_DESTROY;
        let response = self.client.call(&op, &[name], QueryOptions::default()).await?;
        outcome::destroyed(&op, name, &response)
    }

    /// Disables the job
    ///
    /// # Errors
    ///
    /// Not found for a missing job.
    pub async fn disable(&self, name: &str) -> Result<()> {
        self.mutate(&Operation::JOB_DISABLE, name).await
    }

    /// Enables the job
    ///
    /// # Errors
    ///
    /// Not found for a missing job.
    pub async fn enable(&self, name: &str) -> Result<()> {
        self.mutate(&Operation::JOB_ENABLE, name).await
    }

    /// Returns whether the job exists
    ///
    /// # Errors
    ///
    /// Protocol failure for any status other than `200` or `404`.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let op = Operation::JOB_EXISTS;
        let response = self.client.call(&op, &[name], QueryOptions::default()).await?;
        outcome::exists(&op, &response)
    }

    /// Returns the job's JSON description
    ///
    /// # Errors
    ///
    /// Not found for a missing job, bad data for a corrupted body.
    pub async fn get(&self, name: &str, get: &GetOptions) -> Result<Value> {
        let op = Operation::JOB_GET;
        let response = self.client.call(&op, &[name], options(*get)).await?;
        outcome::json(&op, &[name], &response)
    }

    /// Lists top-level jobs
    ///
    /// # Errors
    ///
    /// Bad data when the body is corrupted or has no `jobs` array.
    pub async fn list(&self, get: &GetOptions) -> Result<Vec<Value>> {
        let op = Operation::JOB_LIST;
        let response = self.client.call(&op, &[], options(*get)).await?;
        outcome::list(&op, "jobs", &response)
    }

    async fn mutate(&self, op: &Operation, name: &str) -> Result<()> {
        let response = self.client.call(op, &[name], QueryOptions::default()).await?;
        outcome::empty(op, &[name], &response)
    }
}
