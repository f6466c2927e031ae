//! Query and path builder
//!
//! Pure functions turning an [`Operation`], its identifiers and options into
//! a percent-encoded path and an ordered query.

use url::form_urlencoded;

use super::operation::{Family, Operation};

/// Logical name of the built-in node
pub const MASTER: &str = "master";

/// Path segment the built-in node is addressed by
pub const MASTER_SEGMENT: &str = "(master)";

/// Returns true for either name of the built-in node
#[must_use]
pub fn is_master(name: &str) -> bool {
    name == MASTER || name == MASTER_SEGMENT
}

/// Path and query of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    /// Percent-encoded path, starting with `/`
    pub path: String,
    /// Query parameters in wire order
    pub query: Vec<(String, String)>,
}

impl Target {
    /// Appends a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Returns the encoded query string, without the leading `?`
    #[must_use]
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }
}

/// Query-affecting options, borrowed from the public option structs
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions<'a> {
    /// `depth` for JSON reads; `None` means `0`
    pub depth: Option<u32>,
    /// Remote trigger token
    pub token: Option<&'a str>,
    /// Build parameters
    pub parameters: &'a [(String, String)],
    /// Offline cause for node toggles
    pub offline_message: Option<&'a str>,
}

/// Builds the target of `operation`
///
/// Query order is `depth`, parameters, `token`, `offlineMessage`. `depth` is
/// present on every JSON read; `offlineMessage` only on node toggles.
#[must_use]
pub fn build(operation: &Operation, identifiers: &[&str], options: &QueryOptions<'_>) -> Target {
    let mut path = fill(operation, identifiers);

    if *operation == Operation::JOB_BUILD && !options.parameters.is_empty() {
        path.push_str("WithParameters");
    }

    let mut query = Vec::new();

    if operation.reads_json() {
        query.push(("depth".to_string(), options.depth.unwrap_or(0).to_string()));
    }

    for (key, value) in options.parameters {
        query.push((key.clone(), value.clone()));
    }

    if let Some(token) = options.token {
        query.push(("token".to_string(), token.to_string()));
    }

    if is_toggle(operation) {
        let message = options.offline_message.unwrap_or_default();
        query.push(("offlineMessage".to_string(), message.to_string()));
    }

    Target { path, query }
}

/// Encodes one identifier for `family`
///
/// Job names containing `/` address folders (`a/b` becomes `a/job/b`). The
/// node name `master` becomes the literal `(master)`.
#[must_use]
pub fn encode_segment(family: Family, identifier: &str) -> String {
    match family {
        Family::Node if is_master(identifier) => MASTER_SEGMENT.to_string(),
        Family::Job | Family::Build => identifier
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| urlencoding::encode(part).into_owned())
            .collect::<Vec<_>>()
            .join("/job/"),
        _ => urlencoding::encode(identifier).into_owned(),
    }
}

fn fill(operation: &Operation, identifiers: &[&str]) -> String {
    let mut parts = operation.path.split("{}");
    let mut path = parts.next().unwrap_or_default().to_string();
    let mut identifiers = identifiers.iter();

    for part in parts {
        if let Some(identifier) = identifiers.next() {
            path.push_str(&encode_segment(operation.family, identifier));
        }
        path.push_str(part);
    }

    path
}

fn is_toggle(operation: &Operation) -> bool {
    *operation == Operation::NODE_DISABLE_TOGGLE || *operation == Operation::NODE_ENABLE_TOGGLE
}
