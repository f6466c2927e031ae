//! Node operations
//!
//! Node offline state is toggled, not set: sending `toggleOffline` to an
//! offline node brings it back online. [`Nodes::disable`] and
//! [`Nodes::enable`] therefore read the current state first and pick the
//! request from a [`NodeTransition`].
//!
//! The read and the write are separate requests. A concurrent change made
//! elsewhere between the two is not detected.

use serde_json::{Value, json};

use super::{Jenkins, options};
use crate::protocol::builder::{self, QueryOptions, is_master};
use crate::protocol::codec::offline_cause_form;
use crate::protocol::{Body, Error, GetOptions, NodeCreateOptions, Operation, Result, outcome};

const DUMB_SLAVE: &str = "hudson.slaves.DumbSlave$DescriptorImpl";
const JNLP_LAUNCHER: &str = "hudson.slaves.JNLPLauncher";
const RETENTION_ALWAYS: &str = "hudson.slaves.RetentionStrategy$Always";

/// Offline state of a node as reported by `api/json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// Accepting builds
    Online,
    /// Temporarily offline
    Offline {
        /// Offline cause, empty when none was given
        reason: String,
    },
}

/// Request needed to move a node to the wanted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTransition {
    /// Send `toggleOffline` with this cause
    Toggle {
        /// Offline cause carried by the toggle
        message: String,
    },
    /// Rewrite the cause of an already offline node
    UpdateCause {
        /// New offline cause
        message: String,
    },
    /// The node is already in the wanted state
    Unchanged,
}

impl NodeState {
    /// Reads `temporarilyOffline` and `offlineCauseReason` from a node document
    #[must_use]
    pub fn from_json(node: &Value) -> Option<Self> {
        if !node.get("temporarilyOffline")?.as_bool()? {
            return Some(Self::Online);
        }

        let reason = node
            .get("offlineCauseReason")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Some(Self::Offline {
            reason: reason.to_string(),
        })
    }

    /// Returns true when temporarily offline
    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline { .. })
    }

    /// Transition taking the node offline with `message`
    ///
    /// An offline node is never toggled again; its cause is rewritten.
    #[must_use]
    pub fn disable(&self, message: &str) -> NodeTransition {
        match self {
            Self::Online => NodeTransition::Toggle {
                message: message.to_string(),
            },
            Self::Offline { .. } => NodeTransition::UpdateCause {
                message: message.to_string(),
            },
        }
    }

    /// Transition bringing the node online
    #[must_use]
    pub fn enable(&self) -> NodeTransition {
        match self {
            Self::Online => NodeTransition::Unchanged,
            Self::Offline { .. } => NodeTransition::Toggle {
                message: String::new(),
            },
        }
    }
}

/// Node facade, obtained from [`Jenkins::node`]
///
/// The name `master` addresses the built-in node.
#[derive(Debug, Clone, Copy)]
pub struct Nodes<'a> {
    client: &'a Jenkins,
}

impl<'a> Nodes<'a> {
    pub(super) fn new(client: &'a Jenkins) -> Self {
        Self { client }
    }

    /// Returns the node's `config.xml`
    ///
    /// # Errors
    ///
    /// Not found for a missing node.
    pub async fn config(&self, name: &str) -> Result<String> {
        let op = Operation::NODE_CONFIG_GET;
        let response = self.client.call(&op, &[name], QueryOptions::default()).await?;
        outcome::text(&op, &[name], &response)
    }

    /// Replaces the node's `config.xml`
    ///
    /// # Errors
    ///
    /// Unsupported `"master not supported"` for the built-in node, without
    /// sending anything.
    pub async fn set_config(&self, name: &str, xml: &str) -> Result<()> {
        let op = Operation::NODE_CONFIG_SET;

        if is_master(name) {
            return Err(Error::unsupported(op.scope(), "master not supported"));
        }

        let target = builder::build(&op, &[name], &QueryOptions::default());
        let response = self.client.dispatch(&op, target, Some(Body::xml(xml))).await?;
        outcome::empty(&op, &[name], &response)
    }

    /// Creates a permanent agent launched over JNLP
    ///
    /// # Errors
    ///
    /// Conflict with the server's reason when the node already exists.
    pub async fn create(&self, name: &str, create: &NodeCreateOptions) -> Result<()> {
        let op = Operation::NODE_CREATE;
        let target = builder::build(&op, &[], &QueryOptions::default());

        let descriptor = json!({
            "name": name,
            "nodeDescription": create.description,
            "numExecutors": create.executors,
            "remoteFS": create.remote_fs,
            "labelString": create.labels.join(" "),
            "mode": create.mode(),
            "type": DUMB_SLAVE,
            "retentionStrategy": { "stapler-class": RETENTION_ALWAYS },
            "nodeProperties": { "stapler-class-bag": "true" },
            "launcher": { "stapler-class": JNLP_LAUNCHER },
        })
        .to_string();

        let body = Body::form(&[
            ("name", name),
            ("type", DUMB_SLAVE),
            ("json", descriptor.as_str()),
        ]);

        let response = self.client.dispatch(&op, target, Some(body)).await?;
        outcome::empty(&op, &[name], &response)
    }

    /// Deletes the node
    ///
    /// # Errors
    ///
    /// Not found for a missing node, operation failure `"failed to delete: <name>"`
    /// when the server answers `200` instead of redirecting.
    pub async fn destroy(&self, name: &str) -> Result<()> {
        let op = Operation::NODE_DESTROY;
        let response = self.client.call(&op, &[name], QueryOptions::default()).await?;
        outcome::destroyed(&op, name, &response)
    }

    /// Takes the node offline with `message` as the cause
    ///
    /// An online node is toggled; an offline node keeps its state and gets
    /// its cause rewritten.
    ///
    /// # Errors
    ///
    /// Not found for a missing node, bad data when the state cannot be read.
    pub async fn disable(&self, name: &str, message: &str) -> Result<()> {
        let state = self.state(&Operation::NODE_DISABLE_STATE, name).await?;
        let transition = state.disable(message);

        self.apply(&transition, name, &Operation::NODE_DISABLE_TOGGLE)
            .await?;

        tracing::info!(node = name, ?transition, "node disabled");
        Ok(())
    }

    /// Brings the node online
    ///
    /// Does nothing beyond the state read when the node is already online.
    ///
    /// # Errors
    ///
    /// Not found for a missing node, bad data when the state cannot be read.
    pub async fn enable(&self, name: &str) -> Result<()> {
        let state = self.state(&Operation::NODE_ENABLE_STATE, name).await?;
        let transition = state.enable();

        self.apply(&transition, name, &Operation::NODE_ENABLE_TOGGLE)
            .await?;

        tracing::info!(node = name, ?transition, "node enabled");
        Ok(())
    }

    /// Returns whether the node exists
    ///
    /// # Errors
    ///
    /// Protocol failure for any status other than `200` or `404`.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let op = Operation::NODE_EXISTS;
        let response = self.client.call(&op, &[name], QueryOptions::default()).await?;
        outcome::exists(&op, &response)
    }

    /// Returns the node's JSON description
    ///
    /// # Errors
    ///
    /// Not found for a missing node.
    pub async fn get(&self, name: &str, get: &GetOptions) -> Result<Value> {
        let op = Operation::NODE_GET;
        let response = self.client.call(&op, &[name], options(*get)).await?;
        outcome::json(&op, &[name], &response)
    }

    /// Lists nodes
    ///
    /// # Errors
    ///
    /// Bad data when the body is corrupted or has no `computer` array.
    pub async fn list(&self, get: &GetOptions) -> Result<Vec<Value>> {
        let op = Operation::NODE_LIST;
        let response = self.client.call(&op, &[], options(*get)).await?;
        outcome::list(&op, "computer", &response)
    }

    async fn state(&self, op: &Operation, name: &str) -> Result<NodeState> {
        let response = self
            .client
            .call(op, &[name], options(GetOptions::default()))
            .await?;
        let node = outcome::json(op, &[name], &response)?;

        NodeState::from_json(&node).ok_or_else(|| Error::bad_data(op.scope()))
    }

    async fn apply(&self, transition: &NodeTransition, name: &str, toggle: &Operation) -> Result<()> {
        match transition {
            NodeTransition::Toggle { message } => {
                let query = QueryOptions {
                    offline_message: Some(message.as_str()),
                    ..QueryOptions::default()
                };
                let response = self.client.call(toggle, &[name], query).await?;
                outcome::empty(toggle, &[name], &response)
            }
            NodeTransition::UpdateCause { message } => {
                let op = Operation::NODE_DISABLE_CAUSE;
                let target = builder::build(&op, &[name], &QueryOptions::default());
                let response = self
                    .client
                    .dispatch(&op, target, Some(offline_cause_form(message)))
                    .await?;
                outcome::empty(&op, &[name], &response)
            }
            NodeTransition::Unchanged => Ok(()),
        }
    }
}
