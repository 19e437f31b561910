//! CLI error types.

use idstore_document::DocumentError;
use idstore_storage::{IdentityError, StorageError};
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] idstore_core::Error),

    /// Document store error.
    #[error("database error: {0}")]
    Database(#[from] DocumentError),

    /// Store operation error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The store rejected a create, update or delete.
    #[error("{0}")]
    Rejected(String),

    /// Resource not found.
    #[error("{resource_type} not found: {id}")]
    NotFound {
        /// Type of resource.
        resource_type: &'static str,
        /// Resource identifier.
        id: String,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Creates a rejection from the errors of a failed identity result.
    #[must_use]
    pub fn rejected(errors: &[IdentityError]) -> Self {
        let message = errors
            .iter()
            .map(|e| e.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Rejected(message)
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
