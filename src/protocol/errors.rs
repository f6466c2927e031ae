//! Normalized errors
//!
//! Every failure reaching the caller is an [`Error`] carrying the scope of the
//! operation (`family.operation`) and a human-readable detail.

use thiserror::Error;

use super::operation::Scope;
use crate::transport::TransportError;

/// Detail used for every JSON decode failure
pub const BAD_DATA: &str = "returned bad data";

/// Errors returned by every client operation
#[derive(Error, Debug)]
pub enum Error {
    /// The resource does not exist
    #[error("{scope}: {detail}")]
    NotFound {
        /// Operation scope.
        scope: Scope,
        /// Error detail.
        detail: String,
    },

    /// The server answered but the body could not be decoded
    #[error("{scope}: {detail}")]
    BadData {
        /// Operation scope.
        scope: Scope,
        /// Error detail.
        detail: String,
    },

    /// The server rejected the request with a reason header
    #[error("{scope}: {detail}")]
    Conflict {
        /// Operation scope.
        scope: Scope,
        /// Server-supplied reason, verbatim.
        detail: String,
    },

    /// The server did not perform the requested side effect
    #[error("{scope}: {detail}")]
    OperationFailed {
        /// Operation scope.
        scope: Scope,
        /// Error detail.
        detail: String,
    },

    /// The operation is not allowed for this target
    #[error("{scope}: {detail}")]
    Unsupported {
        /// Operation scope.
        scope: Scope,
        /// Error detail.
        detail: String,
    },

    /// The response violates the contract of the operation
    #[error("{scope}: {detail}")]
    Protocol {
        /// Operation scope.
        scope: Scope,
        /// Error detail.
        detail: String,
    },

    /// Connection-level failure
    #[error("{scope}: {source}")]
    Transport {
        /// Operation scope.
        scope: Scope,
        /// Underlying transport failure.
        source: TransportError,
    },
}

/// Discriminant of [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::NotFound`]
    NotFound,
    /// See [`Error::BadData`]
    BadData,
    /// See [`Error::Conflict`]
    Conflict,
    /// See [`Error::OperationFailed`]
    OperationFailed,
    /// See [`Error::Unsupported`]
    Unsupported,
    /// See [`Error::Protocol`]
    Protocol,
    /// See [`Error::Transport`]
    Transport,
}

impl Error {
    /// Returns the operation scope
    #[must_use]
    pub fn scope(&self) -> Scope {
        match self {
            Self::NotFound { scope, .. }
            | Self::BadData { scope, .. }
            | Self::Conflict { scope, .. }
            | Self::OperationFailed { scope, .. }
            | Self::Unsupported { scope, .. }
            | Self::Protocol { scope, .. }
            | Self::Transport { scope, .. } => *scope,
        }
    }

    /// Returns the human-readable detail
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { detail, .. }
            | Self::BadData { detail, .. }
            | Self::Conflict { detail, .. }
            | Self::OperationFailed { detail, .. }
            | Self::Unsupported { detail, .. }
            | Self::Protocol { detail, .. } => detail.clone(),
            Self::Transport { source, .. } => source.to_string(),
        }
    }

    /// Returns the error kind
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::BadData { .. } => ErrorKind::BadData,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::OperationFailed { .. } => ErrorKind::OperationFailed,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// Returns true for [`ErrorKind::NotFound`]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// `"<identifiers> not found"`, identifiers joined by a space
    pub(crate) fn not_found(scope: Scope, identifiers: &[&str]) -> Self {
        let detail = if identifiers.is_empty() {
            "not found".to_string()
        } else {
            format!("{} not found", identifiers.join(" "))
        };
        Self::NotFound { scope, detail }
    }

    pub(crate) fn bad_data(scope: Scope) -> Self {
        Self::BadData {
            scope,
            detail: BAD_DATA.to_string(),
        }
    }

    pub(crate) fn conflict(scope: Scope, reason: impl Into<String>) -> Self {
        Self::Conflict {
            scope,
            detail: reason.into(),
        }
    }

    pub(crate) fn failed(scope: Scope, detail: impl Into<String>) -> Self {
        Self::OperationFailed {
            scope,
            detail: detail.into(),
        }
    }

    pub(crate) fn unsupported(scope: Scope, detail: impl Into<String>) -> Self {
        Self::Unsupported {
            scope,
            detail: detail.into(),
        }
    }

    pub(crate) fn protocol(scope: Scope, detail: impl Into<String>) -> Self {
        Self::Protocol {
            scope,
            detail: detail.into(),
        }
    }

    pub(crate) fn transport(scope: Scope, source: TransportError) -> Self {
        Self::Transport { scope, source }
    }
}

/// Result type for client operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
