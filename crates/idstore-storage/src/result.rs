//! Outcome of create, update and delete operations.
//!
//! The identity framework expects these entry points to report failure as a
//! value rather than an error, so stores fold persistence failures into
//! [`IdentityResult::Failed`] after logging the cause.

use serde::Serialize;

/// A failure reported to the identity framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityError {
    /// Machine-readable code.
    pub code: String,
    /// Human-readable description.
    pub description: String,
}

impl IdentityError {
    /// Code used when a persistence call fails.
    pub const STORAGE_FAILURE: &'static str = "StorageFailure";
    /// Code used when the caller cancelled the operation.
    pub const OPERATION_CANCELED: &'static str = "OperationCanceled";

    /// Creates an error.
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Creates a persistence failure.
    #[must_use]
    pub fn storage_failure(description: impl Into<String>) -> Self {
        Self::new(Self::STORAGE_FAILURE, description)
    }

    /// Creates a cancellation failure.
    #[must_use]
    pub fn canceled() -> Self {
        Self::new(Self::OPERATION_CANCELED, "The operation was canceled.")
    }
}

impl std::fmt::Display for IdentityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

/// Result of a create, update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "errors", rename_all = "snake_case")]
pub enum IdentityResult {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Failed(Vec<IdentityError>),
}

impl IdentityResult {
    /// Creates a failed result with one error.
    #[must_use]
    pub fn failed(error: IdentityError) -> Self {
        Self::Failed(vec![error])
    }

    /// Checks if the operation succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the reported errors; empty on success.
    #[must_use]
    pub fn errors(&self) -> &[IdentityError] {
        match self {
            Self::Success => &[],
            Self::Failed(errors) => errors,
        }
    }
}
