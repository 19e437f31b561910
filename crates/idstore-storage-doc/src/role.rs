//! Document-backed role store.

use async_trait::async_trait;
use idstore_document::{DocumentSession, DocumentStore, Filter};
use idstore_model::IdentityRole;
use idstore_model::role::fields;
use idstore_storage::{
    IdentityResult, QueryableRoleStore, RoleStore, StorageResult, ensure_active,
};
use tokio_util::sync::CancellationToken;

use crate::outcome::{ROLE_DELETE_FAILED, ROLE_SAVE_FAILED, write};

/// Role store persisting [`IdentityRole`] documents.
#[derive(Debug, Clone)]
pub struct DocumentRoleStore<S> {
    store: S,
}

impl<S> DocumentRoleStore<S> {
    /// Creates a role store over a document store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying document store.
    pub const fn document_store(&self) -> &S {
        &self.store
    }
}

impl<S: DocumentStore> DocumentRoleStore<S> {
    /// Deletes every role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    pub async fn wipe(&self, cancel: &CancellationToken) -> StorageResult<()> {
        ensure_active(cancel)?;
        let mut session = self.store.open_session();
        session.delete_where::<IdentityRole>(Filter::All);
        session.save_changes().await?;
        tracing::info!("all roles deleted");
        Ok(())
    }
}

#[async_trait]
impl<S: DocumentStore> RoleStore for DocumentRoleStore<S> {
    async fn create(&self, role: &IdentityRole, cancel: &CancellationToken) -> IdentityResult {
        write(&self.store, cancel, "role", &role.id, ROLE_SAVE_FAILED, |session| {
            session.insert(role)
        })
        .await
    }

    async fn update(&self, role: &IdentityRole, cancel: &CancellationToken) -> IdentityResult {
        write(&self.store, cancel, "role", &role.id, ROLE_SAVE_FAILED, |session| {
            session.update(role)
        })
        .await
    }

    async fn delete(&self, role: &IdentityRole, cancel: &CancellationToken) -> IdentityResult {
        write(&self.store, cancel, "role", &role.id, ROLE_DELETE_FAILED, |session| {
            session.delete::<IdentityRole>(&role.id);
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityRole>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        Ok(session.load::<IdentityRole>(id).await?)
    }

    async fn find_by_name(
        &self,
        normalized_name: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityRole>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        let filter = Filter::eq(fields::NORMALIZED_NAME, normalized_name);
        Ok(session.first::<IdentityRole>(&filter).await?)
    }
}

#[async_trait]
impl<S: DocumentStore> QueryableRoleStore for DocumentRoleStore<S> {
    async fn roles(&self, cancel: &CancellationToken) -> StorageResult<Vec<IdentityRole>> {
        ensure_active(cancel)?;
        let session = self.store.open_session();
        Ok(session.query::<IdentityRole>(&Filter::All).await?)
    }
}
