//! # rustline-jenkins - A typed Jenkins REST client
//!
//! Maps the job, build, node and queue resources of a Jenkins server onto
//! async facades and normalizes every server reply into either a decoded
//! value or an [`Error`] scoped to the operation that produced it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rustline_jenkins::{GetOptions, Jenkins};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let jenkins = Jenkins::new("http://localhost:8080")?;
//!
//! if jenkins.job().exists("deploy").await? {
//!     let job = jenkins.job().get("deploy", &GetOptions::default()).await?;
//!     println!("{}", job["color"]);
//! }
//!
//! jenkins.node().disable("agent-1", "maintenance").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Layers
//!
//! - [`protocol`]: operation table, request targets, bodies and status mapping
//! - [`transport`]: the [`Transport`] seam and its reqwest implementation
//! - [`client`]: the [`Jenkins`] client and its per-family facades
//! - [`infrastructure`]: configuration and logging
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <https://www.apache.org/licenses/LICENSE-2.0>)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or <https://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod client;
pub mod infrastructure;
pub mod protocol;
pub mod transport;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use client::{Builds, Jenkins, Jobs, NodeState, NodeTransition, Nodes, Queue};
pub use infrastructure::{Config, ConfigError, init_logging};
pub use protocol::{
    BuildOptions, Error, ErrorKind, Family, GetOptions, NodeCreateOptions, Operation, Result,
    Scope,
};
pub use transport::{ReqwestTransport, Request, Response, Transport, TransportError};

/// Version of the rustline-jenkins crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
