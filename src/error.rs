use std::time::Duration;

use thiserror::Error;

use crate::constants::GENERIC_INTERNAL_MESSAGE;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors produced while classifying requests, enforcing permissions, or
/// administering permission records.
#[derive(Debug, Error)]
pub enum GateError {
    /// The caller lacks an ACL, an operation, or access to a resource.
    #[error("{message}")]
    Unauthorized { message: String },

    /// A record is missing a field required before it can be persisted.
    #[error("{kind}: missing field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    /// A filter ran without a value the classification step should have produced.
    #[error("{filter} filter: {missing} missing from request scope")]
    PipelineInvariant {
        filter: &'static str,
        missing: &'static str,
    },

    #[error("invalid resource pattern '{pattern}': {reason}")]
    InvalidResourcePattern { pattern: String, reason: String },

    #[error("permission with username={username} not found")]
    PermissionNotFound { username: String },

    #[error("permission with username={username} already exists")]
    PermissionExists { username: String },

    /// A record or update that is well-formed JSON but unusable.
    #[error("invalid permission record: {reason}")]
    InvalidRecord { reason: String },

    /// Failure reported by the storage collaborator, kept verbatim.
    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("credential hashing failed: {reason}")]
    Hashing { reason: String },

    #[error("permission lookup exceeded {timeout:?}")]
    LookupTimeout { timeout: Duration },

    #[error("request cancelled before authorization completed")]
    Cancelled,

    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GateError {
    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// True for failures that mean the pipeline or a collaborator is broken,
    /// as opposed to the caller lacking rights or sending a bad record.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::PipelineInvariant { .. }
                | Self::Storage { .. }
                | Self::Hashing { .. }
                | Self::LookupTimeout { .. }
                | Self::Cancelled
                | Self::Config { .. }
                | Self::Serialization(_)
        )
    }

    /// HTTP status the proxy should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized { .. } => 401,
            Self::MissingField { .. }
            | Self::InvalidResourcePattern { .. }
            | Self::InvalidRecord { .. } => 400,
            Self::PermissionNotFound { .. } => 404,
            Self::PermissionExists { .. } => 409,
            Self::Cancelled => 499,
            Self::LookupTimeout { .. } => 503,
            Self::PipelineInvariant { .. }
            | Self::Storage { .. }
            | Self::Hashing { .. }
            | Self::Config { .. }
            | Self::Serialization(_) => 500,
        }
    }

    /// Message safe to send back to the caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            GENERIC_INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
