//! Operation descriptors
//!
//! Every public operation maps to one or more immutable [`Operation`]
//! descriptors. The descriptor is the single source for the HTTP method, the
//! path template, the accepted statuses and the error scope.

use std::fmt;

/// Resource family an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Jobs (`/job/...`, `/createItem`)
    Job,
    /// Builds of a job (`/job/{name}/{number}/...`)
    Build,
    /// Nodes (`/computer/...`)
    Node,
    /// Build queue (`/queue/...`)
    Queue,
    /// Server-wide endpoints (`/api/json`)
    Server,
}

impl Family {
    /// Returns the lowercase name used in error scopes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Build => "build",
            Self::Node => "node",
            Self::Queue => "queue",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP methods used against Jenkins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// HEAD
    Head,
}

impl Method {
    /// Returns the method as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statuses an operation treats as success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Only the listed statuses
    Only(&'static [u16]),
    /// Any 2xx status
    Successful,
}

impl Accept {
    /// Returns true if `status` signals success
    #[must_use]
    pub fn contains(self, status: u16) -> bool {
        match self {
            Self::Only(statuses) => statuses.contains(&status),
            Self::Successful => (200..300).contains(&status),
        }
    }
}

/// Where the success payload of an operation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierSource {
    /// Nothing beyond the status
    None,
    /// An integer embedded in the `Location` header
    Location,
    /// The response body
    Body,
}

/// Error scope: `family.operation`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope {
    /// Resource family
    pub family: Family,
    /// Public operation name
    pub operation: &'static str,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.family, self.operation)
    }
}

/// Immutable description of a single HTTP exchange
///
/// Path templates use `{}` for positional identifiers, filled in order by
/// [`crate::protocol::builder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Resource family
    pub family: Family,
    /// Public operation name, shared by every exchange of a multi-step call
    pub name: &'static str,
    /// HTTP method
    pub method: Method,
    /// Path template
    pub path: &'static str,
    /// Accepted statuses
    pub accept: Accept,
    /// Source of the success payload
    pub identifier: IdentifierSource,
}

impl Operation {
    const fn new(
        family: Family,
        name: &'static str,
        method: Method,
        path: &'static str,
        accept: Accept,
        identifier: IdentifierSource,
    ) -> Self {
        Self {
            family,
            name,
            method,
            path,
            accept,
            identifier,
        }
    }

    /// Returns the error scope of this operation
    #[must_use]
    pub const fn scope(&self) -> Scope {
        Scope {
            family: self.family,
            operation: self.name,
        }
    }

    /// Returns true if `status` signals success for this operation
    #[must_use]
    pub fn accepts(&self, status: u16) -> bool {
        self.accept.contains(status)
    }

    /// Returns true for JSON reads, which always carry a `depth` parameter
    #[must_use]
    pub fn reads_json(&self) -> bool {
        matches!(self.method, Method::Get) && self.path.ends_with("/api/json")
    }

    // Jobs

    /// Queue a build of a job
    pub const JOB_BUILD: Self = Self::new(
        Family::Job,
        "build",
        Method::Post,
        "/job/{}/build",
        Accept::Only(&[201]),
        IdentifierSource::Location,
    );
    /// Read a job's `config.xml`
    pub const JOB_CONFIG_GET: Self = Self::new(
        Family::Job,
        "config",
        Method::Get,
        "/job/{}/config.xml",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Replace a job's `config.xml`
    pub const JOB_CONFIG_SET: Self = Self::new(
        Family::Job,
        "config",
        Method::Post,
        "/job/{}/config.xml",
        Accept::Successful,
        IdentifierSource::None,
    );
    /// Copy an existing job
    pub const JOB_COPY: Self = Self::new(
        Family::Job,
        "copy",
        Method::Post,
        "/createItem",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Create a job from `config.xml`
    pub const JOB_CREATE: Self = Self::new(
        Family::Job,
        "create",
        Method::Post,
        "/createItem",
        Accept::Only(&[200, 201]),
        IdentifierSource::None,
    );
    /// Delete a job
    pub const JOB_DESTROY: Self = Self::new(
        Family::Job,
        "destroy",
        Method::Post,
        "/job/{}/doDelete",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Disable a job
    pub const JOB_DISABLE: Self = Self::new(
        Family::Job,
        "disable",
        Method::Post,
        "/job/{}/disable",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Enable a job
    pub const JOB_ENABLE: Self = Self::new(
        Family::Job,
        "enable",
        Method::Post,
        "/job/{}/enable",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Probe a job
    pub const JOB_EXISTS: Self = Self::new(
        Family::Job,
        "exists",
        Method::Head,
        "/job/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::None,
    );
    /// Read a job
    pub const JOB_GET: Self = Self::new(
        Family::Job,
        "get",
        Method::Get,
        "/job/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// List jobs
    pub const JOB_LIST: Self = Self::new(
        Family::Job,
        "list",
        Method::Get,
        "/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );

    // Builds

    /// Read a build
    pub const BUILD_GET: Self = Self::new(
        Family::Build,
        "get",
        Method::Get,
        "/job/{}/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Abort a running build
    pub const BUILD_STOP: Self = Self::new(
        Family::Build,
        "stop",
        Method::Post,
        "/job/{}/{}/stop",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Read a build's console output
    pub const BUILD_LOG: Self = Self::new(
        Family::Build,
        "log",
        Method::Get,
        "/job/{}/{}/consoleText",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );

    // Nodes

    /// Read a node's `config.xml`
    pub const NODE_CONFIG_GET: Self = Self::new(
        Family::Node,
        "config",
        Method::Get,
        "/computer/{}/config.xml",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Replace a node's `config.xml`
    pub const NODE_CONFIG_SET: Self = Self::new(
        Family::Node,
        "config",
        Method::Post,
        "/computer/{}/config.xml",
        Accept::Successful,
        IdentifierSource::None,
    );
    /// Create a node
    pub const NODE_CREATE: Self = Self::new(
        Family::Node,
        "create",
        Method::Post,
        "/computer/doCreateItem",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Delete a node
    pub const NODE_DESTROY: Self = Self::new(
        Family::Node,
        "destroy",
        Method::Post,
        "/computer/{}/doDelete",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// State read preceding a disable
    pub const NODE_DISABLE_STATE: Self = Self::new(
        Family::Node,
        "disable",
        Method::Get,
        "/computer/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Take an online node offline
    pub const NODE_DISABLE_TOGGLE: Self = Self::new(
        Family::Node,
        "disable",
        Method::Post,
        "/computer/{}/toggleOffline",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Rewrite the offline cause of an offline node
    pub const NODE_DISABLE_CAUSE: Self = Self::new(
        Family::Node,
        "disable",
        Method::Post,
        "/computer/{}/changeOfflineCause",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// State read preceding an enable
    pub const NODE_ENABLE_STATE: Self = Self::new(
        Family::Node,
        "enable",
        Method::Get,
        "/computer/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Bring an offline node back online
    pub const NODE_ENABLE_TOGGLE: Self = Self::new(
        Family::Node,
        "enable",
        Method::Post,
        "/computer/{}/toggleOffline",
        Accept::Only(&[302]),
        IdentifierSource::None,
    );
    /// Probe a node
    pub const NODE_EXISTS: Self = Self::new(
        Family::Node,
        "exists",
        Method::Head,
        "/computer/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::None,
    );
    /// Read a node
    pub const NODE_GET: Self = Self::new(
        Family::Node,
        "get",
        Method::Get,
        "/computer/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// List nodes
    pub const NODE_LIST: Self = Self::new(
        Family::Node,
        "list",
        Method::Get,
        "/computer/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );

    // Queue

    /// List queued items
    pub const QUEUE_LIST: Self = Self::new(
        Family::Queue,
        "list",
        Method::Get,
        "/queue/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Read a queued item
    pub const QUEUE_GET: Self = Self::new(
        Family::Queue,
        "get",
        Method::Get,
        "/queue/item/{}/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
    /// Cancel a queued item
    pub const QUEUE_CANCEL: Self = Self::new(
        Family::Queue,
        "cancel",
        Method::Post,
        "/queue/cancelItem",
        Accept::Successful,
        IdentifierSource::None,
    );

    // Server

    /// Read server information
    pub const SERVER_INFO: Self = Self::new(
        Family::Server,
        "info",
        Method::Get,
        "/api/json",
        Accept::Only(&[200]),
        IdentifierSource::Body,
    );
}
