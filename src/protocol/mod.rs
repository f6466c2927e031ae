//! Resource mapping and error normalization
//!
//! Pure request building and response interpretation, independent of any
//! HTTP client:
//! - [`operation`]: immutable descriptors, one per exchange
//! - [`builder`]: paths and queries
//! - [`codec`]: request and response bodies
//! - [`outcome`]: status policy and identifier extraction
//! - [`errors`]: the normalized error shape

pub mod builder;
pub mod codec;
pub mod errors;
pub mod operation;
pub mod options;
pub mod outcome;

pub use builder::{MASTER, MASTER_SEGMENT, QueryOptions, Target, is_master};
pub use codec::Body;
pub use errors::{Error, ErrorKind, Result};
pub use operation::{Accept, Family, IdentifierSource, Method, Operation, Scope};
pub use options::{BuildOptions, GetOptions, NodeCreateOptions};
pub use outcome::parse_location_id;
