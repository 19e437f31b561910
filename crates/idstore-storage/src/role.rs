//! Role store facets.

use async_trait::async_trait;
use idstore_model::IdentityRole;
use tokio_util::sync::CancellationToken;

use crate::error::StorageResult;
use crate::result::IdentityResult;

/// Core role store.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Persists a new role.
    async fn create(&self, role: &IdentityRole, cancel: &CancellationToken) -> IdentityResult;

    /// Overwrites a persisted role. Updating an absent role fails.
    async fn update(&self, role: &IdentityRole, cancel: &CancellationToken) -> IdentityResult;

    /// Deletes a role by id.
    async fn delete(&self, role: &IdentityRole, cancel: &CancellationToken) -> IdentityResult;

    /// Finds a role by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn find_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityRole>>;

    /// Finds a role by normalized name.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn find_by_name(
        &self,
        normalized_name: &str,
        cancel: &CancellationToken,
    ) -> StorageResult<Option<IdentityRole>>;

    /// Returns the role id.
    fn role_id<'a>(&self, role: &'a IdentityRole) -> &'a str {
        &role.id
    }

    /// Returns the role name.
    fn role_name<'a>(&self, role: &'a IdentityRole) -> Option<&'a str> {
        role.name.as_deref()
    }

    /// Sets the role name.
    fn set_role_name(&self, role: &mut IdentityRole, name: Option<String>) {
        role.name = name;
    }

    /// Returns the normalized role name.
    fn normalized_role_name<'a>(&self, role: &'a IdentityRole) -> Option<&'a str> {
        role.normalized_name.as_deref()
    }

    /// Sets the normalized role name.
    fn set_normalized_role_name(&self, role: &mut IdentityRole, name: Option<String>) {
        role.normalized_name = name;
    }
}

/// Enumeration of roles.
#[async_trait]
pub trait QueryableRoleStore: RoleStore {
    /// Returns every role, ordered by id.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Cancelled` or `StorageError::Document`.
    async fn roles(&self, cancel: &CancellationToken) -> StorageResult<Vec<IdentityRole>>;
}
