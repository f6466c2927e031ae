//! Per-operation options
//!
//! Each family gets an explicit options structure with documented defaults.
//! Deserializable options ignore unknown keys.

use serde::{Deserialize, Serialize};

/// Options for JSON reads (`get`, `list`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOptions {
    /// Tree depth requested from `api/json` (default `0`)
    pub depth: u32,
}

impl GetOptions {
    /// Creates options with the given depth
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        Self { depth }
    }
}

/// Options for queueing a build
///
/// Parameters keep insertion order on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build parameters, in order
    pub parameters: Vec<(String, String)>,
    /// Remote trigger token
    pub token: Option<String>,
}

impl BuildOptions {
    /// Creates empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a build parameter
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((key.into(), value.into()));
        self
    }

    /// Sets the remote trigger token
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// True when the build targets `buildWithParameters`
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }
}

/// Options for creating a permanent agent node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeCreateOptions {
    /// Node description
    pub description: String,
    /// Number of executors (default `2`)
    pub executors: u32,
    /// Remote root directory (default `/var/lib/jenkins`)
    pub remote_fs: String,
    /// Labels assigned to the node
    pub labels: Vec<String>,
    /// Only run jobs tied to this node
    pub exclusive: bool,
}

impl Default for NodeCreateOptions {
    fn default() -> Self {
        Self {
            description: String::new(),
            executors: 2,
            remote_fs: "/var/lib/jenkins".to_string(),
            labels: Vec::new(),
            exclusive: false,
        }
    }
}

impl NodeCreateOptions {
    /// Jenkins node mode for these options
    #[must_use]
    pub fn mode(&self) -> &'static str {
        if self.exclusive { "EXCLUSIVE" } else { "NORMAL" }
    }
}
