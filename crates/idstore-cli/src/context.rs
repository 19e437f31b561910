//! Shared state handed to every command.

use idstore_document::DocumentStore;
use idstore_model::UpperInvariantNormalizer;
use idstore_storage_doc::{DocumentRoleStore, DocumentUserStore};
use tokio_util::sync::CancellationToken;

use crate::config::OutputFormat;

/// Stores and settings for one CLI invocation.
pub struct Context<S> {
    /// User store.
    pub users: DocumentUserStore<S>,
    /// Role store.
    pub roles: DocumentRoleStore<S>,
    /// Produces lookup keys from names and emails.
    pub normalizer: UpperInvariantNormalizer,
    /// Output format.
    pub format: OutputFormat,
    /// Fired on Ctrl-C.
    pub cancel: CancellationToken,
}

impl<S: DocumentStore + Clone> Context<S> {
    /// Creates a context over one document store.
    #[must_use]
    pub fn new(store: S, format: OutputFormat, cancel: CancellationToken) -> Self {
        Self {
            users: DocumentUserStore::new(store.clone()),
            roles: DocumentRoleStore::new(store),
            normalizer: UpperInvariantNormalizer,
            format,
            cancel,
        }
    }
}
