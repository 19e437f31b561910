//! Document store error types.

use thiserror::Error;

/// Errors that can occur while talking to a document store.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// An update targeted a document that does not exist.
    #[error("Document not found: {collection} with id {id}")]
    NotFound {
        /// Collection the document was expected in.
        collection: &'static str,
        /// Document id.
        id: String,
    },

    /// An insert collided with an existing document id.
    #[error("Duplicate document: {collection} with id {id} already exists")]
    Duplicate {
        /// Collection of the conflicting document.
        collection: &'static str,
        /// Conflicting id.
        id: String,
    },

    /// A document could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backend could not be reached.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// A query was rejected by the backend.
    #[error("Database query error: {0}")]
    Query(String),

    /// Opening or committing a unit of work failed.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// A schema, table or role name is not a plain SQL identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),
}

impl DocumentError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(collection: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            collection,
            id: id.into(),
        }
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Converts a `SQLx` error to a document error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: sqlx::Error) -> DocumentError {
    match err {
        sqlx::Error::Database(db_err) => DocumentError::Query(db_err.to_string()),
        sqlx::Error::PoolTimedOut => {
            DocumentError::Connection("Connection pool timeout".to_string())
        }
        sqlx::Error::PoolClosed => DocumentError::Connection("Connection pool closed".to_string()),
        sqlx::Error::Io(io) => DocumentError::Connection(io.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DocumentError::Serialization(err.to_string())
        }
        _ => DocumentError::Query(err.to_string()),
    }
}

/// Checks for a Postgres unique constraint violation (SQLSTATE 23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|c| c == "23505"),
        _ => false,
    }
}

/// Result type for document store operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
