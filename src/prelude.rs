//! Prelude module for common imports

// Client and facades
pub use crate::client::{Builds, Jenkins, Jobs, NodeState, NodeTransition, Nodes, Queue};

// Options and errors
pub use crate::protocol::{
    BuildOptions, Error, ErrorKind, GetOptions, NodeCreateOptions, Result, Scope,
};

// Transport seam
pub use crate::transport::{ReqwestTransport, Request, Response, Transport, TransportError};

// Configuration
pub use crate::infrastructure::{Config, ConfigError};
