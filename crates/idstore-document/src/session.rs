//! Document store and session traits.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::{Document, Filter};
use crate::error::DocumentResult;

/// A queued write, applied when the session saves its changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Insert or overwrite a document.
    Upsert {
        /// Target collection.
        collection: &'static str,
        /// Document id.
        id: String,
        /// Serialized document.
        data: Value,
    },
    /// Insert a document that must not exist yet.
    Insert {
        /// Target collection.
        collection: &'static str,
        /// Document id.
        id: String,
        /// Serialized document.
        data: Value,
    },
    /// Overwrite a document that must already exist.
    Update {
        /// Target collection.
        collection: &'static str,
        /// Document id.
        id: String,
        /// Serialized document.
        data: Value,
    },
    /// Delete a document by id. Deleting an absent document is a no-op.
    Delete {
        /// Target collection.
        collection: &'static str,
        /// Document id.
        id: String,
    },
    /// Delete every document matching a filter.
    DeleteWhere {
        /// Target collection.
        collection: &'static str,
        /// Documents to delete.
        filter: Filter,
    },
}

impl Operation {
    /// Returns the collection the operation touches.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Upsert { collection, .. }
            | Self::Insert { collection, .. }
            | Self::Update { collection, .. }
            | Self::Delete { collection, .. }
            | Self::DeleteWhere { collection, .. } => collection,
        }
    }
}

/// Writes queued by one session, in submission order.
#[derive(Debug, Default, Clone)]
pub struct UnitOfWork {
    operations: Vec<Operation>,
}

impl UnitOfWork {
    /// Creates an empty unit of work.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Queues an operation.
    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Returns the number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns the queued operations.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Takes every queued operation, leaving the unit of work empty.
    pub fn drain(&mut self) -> Vec<Operation> {
        std::mem::take(&mut self.operations)
    }
}

/// A document store.
///
/// Implementations must be thread-safe; each call to
/// [`open_session`](Self::open_session) starts an independent unit of work.
pub trait DocumentStore: Send + Sync {
    /// Session type handed out by this store.
    type Session: DocumentSession;

    /// Opens a new session.
    fn open_session(&self) -> Self::Session;
}

/// One unit of work against a document store.
///
/// Writes are queued locally and only reach the backend on
/// [`save_changes`](Self::save_changes), which applies all of them or none.
/// Reads always hit the backend and never see queued writes.
#[async_trait]
pub trait DocumentSession: Send + Sync {
    /// Returns the session's pending writes.
    fn work(&mut self) -> &mut UnitOfWork;

    /// Returns the number of queued writes.
    fn pending(&mut self) -> usize {
        self.work().len()
    }

    /// Queues an insert-or-overwrite of `doc`.
    ///
    /// ## Errors
    ///
    /// Returns `DocumentError::Serialization` if the document cannot be
    /// serialized.
    fn store<T: Document>(&mut self, doc: &T) -> DocumentResult<()> {
        let data = serde_json::to_value(doc)?;
        self.work().push(Operation::Upsert {
            collection: T::COLLECTION,
            id: doc.id().to_string(),
            data,
        });
        Ok(())
    }

    /// Queues an insert of a document that must not exist yet.
    ///
    /// ## Errors
    ///
    /// Returns `DocumentError::Serialization` if the document cannot be
    /// serialized. Id collisions surface from `save_changes`.
    fn insert<T: Document>(&mut self, doc: &T) -> DocumentResult<()> {
        let data = serde_json::to_value(doc)?;
        self.work().push(Operation::Insert {
            collection: T::COLLECTION,
            id: doc.id().to_string(),
            data,
        });
        Ok(())
    }

    /// Queues a full overwrite of an existing document.
    ///
    /// ## Errors
    ///
    /// Returns `DocumentError::Serialization` if the document cannot be
    /// serialized. A missing target surfaces from `save_changes`.
    fn update<T: Document>(&mut self, doc: &T) -> DocumentResult<()> {
        let data = serde_json::to_value(doc)?;
        self.work().push(Operation::Update {
            collection: T::COLLECTION,
            id: doc.id().to_string(),
            data,
        });
        Ok(())
    }

    /// Queues a delete by id.
    fn delete<T: Document>(&mut self, id: &str) {
        self.work().push(Operation::Delete {
            collection: T::COLLECTION,
            id: id.to_string(),
        });
    }

    /// Queues a delete of every document matching `filter`.
    fn delete_where<T: Document>(&mut self, filter: Filter) {
        self.work().push(Operation::DeleteWhere {
            collection: T::COLLECTION,
            filter,
        });
    }

    /// Loads a document by id.
    async fn load<T: Document>(&self, id: &str) -> DocumentResult<Option<T>>;

    /// Returns every document matching `filter`, ordered by id.
    async fn query<T: Document>(&self, filter: &Filter) -> DocumentResult<Vec<T>>;

    /// Returns the first document (by id) matching `filter`.
    async fn first<T: Document>(&self, filter: &Filter) -> DocumentResult<Option<T>>;

    /// Applies every queued write atomically.
    ///
    /// The queue is emptied whether or not the commit succeeds.
    async fn save_changes(&mut self) -> DocumentResult<()>;
}
