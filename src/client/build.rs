//! Build operations

use serde_json::Value;

use super::{Jenkins, options};
use crate::protocol::builder::QueryOptions;
use crate::protocol::{GetOptions, Operation, Result, outcome};

/// Build facade, obtained from [`Jenkins::build`]
#[derive(Debug, Clone, Copy)]
pub struct Builds<'a> {
    client: &'a Jenkins,
}

impl<'a> Builds<'a> {
    pub(super) fn new(client: &'a Jenkins) -> Self {
        Self { client }
    }

    /// Returns build `number` of job `name`
    ///
    /// # Errors
    ///
    /// Not found `"<name> <number> not found"` for a missing build.
    pub async fn get(&self, name: &str, number: u64, get: &GetOptions) -> Result<Value> {
        let op = Operation::BUILD_GET;
        let number = number.to_string();
        let ids = [name, number.as_str()];

        let response = self.client.call(&op, &ids, options(*get)).await?;
        outcome::json(&op, &ids, &response)
    }

    /// Aborts build `number` of job `name`
    ///
    /// # Errors
    ///
    /// Not found for a missing build.
    pub async fn stop(&self, name: &str, number: u64) -> Result<()> {
        let op = Operation::BUILD_STOP;
        let number = number.to_string();
        let ids = [name, number.as_str()];

        let response = self.client.call(&op, &ids, QueryOptions::default()).await?;
        outcome::empty(&op, &ids, &response)
    }

    /// Returns the console output of build `number`
    ///
    /// # Errors
    ///
    /// Not found for a missing build.
    pub async fn log(&self, name: &str, number: u64) -> Result<String> {
        let op = Operation::BUILD_LOG;
        let number = number.to_string();
        let ids = [name, number.as_str()];

        let response = self.client.call(&op, &ids, QueryOptions::default()).await?;
        outcome::text(&op, &ids, &response)
    }
}
