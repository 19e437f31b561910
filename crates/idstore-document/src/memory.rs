//! In-memory document store.
//!
//! Documents are kept as JSON values so the store exercises the same
//! serialization path as the Postgres backend. Every
//! [`InMemoryDocumentStore`] is independent; clones share state.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::document::{Document, Filter};
use crate::error::{DocumentError, DocumentResult};
use crate::session::{DocumentSession, DocumentStore, Operation, UnitOfWork};

type Collection = BTreeMap<String, Value>;
type Collections = HashMap<&'static str, Collection>;

/// Process-local document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<Collections>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in a collection.
    #[must_use]
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    type Session = InMemorySession;

    fn open_session(&self) -> InMemorySession {
        InMemorySession {
            collections: Arc::clone(&self.collections),
            work: UnitOfWork::new(),
        }
    }
}

/// Session over an [`InMemoryDocumentStore`].
#[derive(Debug)]
pub struct InMemorySession {
    collections: Arc<RwLock<Collections>>,
    work: UnitOfWork,
}

impl InMemorySession {
    fn snapshot<T: Document>(&self, filter: &Filter) -> Vec<Value> {
        self.collections
            .read()
            .get(T::COLLECTION)
            .map(|docs| docs.values().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default()
    }
}

/// Applies one operation to a working copy of the collections.
fn apply(collections: &mut Collections, operation: Operation) -> DocumentResult<()> {
    match operation {
        Operation::Upsert {
            collection,
            id,
            data,
        } => {
            collections.entry(collection).or_default().insert(id, data);
        }
        Operation::Insert {
            collection,
            id,
            data,
        } => {
            let docs = collections.entry(collection).or_default();
            if docs.contains_key(&id) {
                return Err(DocumentError::duplicate(collection, id));
            }
            docs.insert(id, data);
        }
        Operation::Update {
            collection,
            id,
            data,
        } => match collections.get_mut(collection).and_then(|docs| docs.get_mut(&id)) {
            Some(existing) => *existing = data,
            None => return Err(DocumentError::not_found(collection, id)),
        },
        Operation::Delete { collection, id } => {
            if let Some(docs) = collections.get_mut(collection) {
                docs.remove(&id);
            }
        }
        Operation::DeleteWhere { collection, filter } => {
            if let Some(docs) = collections.get_mut(collection) {
                docs.retain(|_, doc| !filter.matches(doc));
            }
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentSession for InMemorySession {
    fn work(&mut self) -> &mut UnitOfWork {
        &mut self.work
    }

    async fn load<T: Document>(&self, id: &str) -> DocumentResult<Option<T>> {
        let doc = self
            .collections
            .read()
            .get(T::COLLECTION)
            .and_then(|docs| docs.get(id))
            .cloned();

        doc.map(serde_json::from_value)
            .transpose()
            .map_err(DocumentError::from)
    }

    async fn query<T: Document>(&self, filter: &Filter) -> DocumentResult<Vec<T>> {
        self.snapshot::<T>(filter)
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(DocumentError::from))
            .collect()
    }

    async fn first<T: Document>(&self, filter: &Filter) -> DocumentResult<Option<T>> {
        let doc = self.snapshot::<T>(filter).into_iter().next();
        doc.map(serde_json::from_value)
            .transpose()
            .map_err(DocumentError::from)
    }

    async fn save_changes(&mut self) -> DocumentResult<()> {
        let operations = self.work.drain();
        if operations.is_empty() {
            return Ok(());
        }
        let count = operations.len();

        // Apply to a copy and swap it in, so a failing batch leaves no trace.
        let mut guard = self.collections.write();
        let mut working = guard.clone();
        for operation in operations {
            apply(&mut working, operation)?;
        }
        *guard = working;

        tracing::debug!(operations = count, "in-memory unit of work committed");
        Ok(())
    }
}
