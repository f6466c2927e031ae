//! Queue operations

use serde_json::Value;

use super::{Jenkins, options};
use crate::protocol::builder::{self, QueryOptions};
use crate::protocol::{GetOptions, Operation, Result, outcome};

/// Queue facade, obtained from [`Jenkins::queue`]
#[derive(Debug, Clone, Copy)]
pub struct Queue<'a> {
    client: &'a Jenkins,
}

impl<'a> Queue<'a> {
    pub(super) fn new(client: &'a Jenkins) -> Self {
        Self { client }
    }

    /// Lists queued items
    ///
    /// # Errors
    ///
    /// Bad data when the body is corrupted or has no `items` array.
    pub async fn list(&self, get: &GetOptions) -> Result<Vec<Value>> {
        let op = Operation::QUEUE_LIST;
        let response = self.client.call(&op, &[], options(*get)).await?;
        outcome::list(&op, "items", &response)
    }

    /// Returns queue item `id`, as returned by [`super::Jobs::build`]
    ///
    /// Once the item leaves the queue its `executable` field carries the
    /// build number.
    ///
    /// # Errors
    ///
    /// Not found once Jenkins has forgotten the item.
    pub async fn get(&self, id: u64, get: &GetOptions) -> Result<Value> {
        let op = Operation::QUEUE_GET;
        let id = id.to_string();

        let response = self.client.call(&op, &[id.as_str()], options(*get)).await?;
        outcome::json(&op, &[id.as_str()], &response)
    }

    /// Cancels queue item `id`
    ///
    /// # Errors
    ///
    /// Operation failure for any non-2xx status, including `404`.
    pub async fn cancel(&self, id: u64) -> Result<()> {
        let op = Operation::QUEUE_CANCEL;
        let id = id.to_string();
        let target = builder::build(&op, &[], &QueryOptions::default()).with_query("id", &id);

        let response = self.client.dispatch(&op, target, None).await?;
        outcome::acknowledged(&op, &response)
    }
}
