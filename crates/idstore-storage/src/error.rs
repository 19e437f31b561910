//! Storage error types.

use idstore_document::DocumentError;
use idstore_model::Claim;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors returned by store lookups and claim operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The document store failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The user has never been persisted.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// A claim to replace is not held by the user.
    #[error("Claim not found: {claim_type} '{value}'")]
    ClaimNotFound {
        /// Claim type.
        claim_type: String,
        /// Claim value.
        value: String,
    },

    /// Some claims to remove were not held by the user.
    ///
    /// The claims that were held have already been removed and persisted.
    #[error("{} claim(s) not found", .0.len())]
    ClaimsNotFound(Vec<Claim>),

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,
}

impl StorageError {
    /// Creates a claim not found error.
    #[must_use]
    pub fn claim_not_found(claim: &Claim) -> Self {
        Self::ClaimNotFound {
            claim_type: claim.claim_type.clone(),
            value: claim.value.clone(),
        }
    }

    /// Checks if this is any kind of not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::ClaimNotFound { .. } | Self::ClaimsNotFound(_)
        )
    }

    /// Checks if the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Fails with [`StorageError::Cancelled`] once `cancel` has fired.
///
/// ## Errors
///
/// Returns `StorageError::Cancelled` if the token is cancelled.
pub fn ensure_active(cancel: &CancellationToken) -> StorageResult<()> {
    if cancel.is_cancelled() {
        Err(StorageError::Cancelled)
    } else {
        Ok(())
    }
}
