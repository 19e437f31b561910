//! Role record.

use idstore_document::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serialized field names usable in document filters.
pub mod fields {
    /// Document id.
    pub const ID: &str = "id";
    /// Normalized role name.
    pub const NORMALIZED_NAME: &str = "normalizedName";
}

/// An identity role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRole {
    /// Unique identifier, fixed at construction.
    pub id: String,
    /// Role name.
    pub name: Option<String>,
    /// Role name lookup key.
    pub normalized_name: Option<String>,
    /// Changes whenever the record is persisted by the framework.
    pub concurrency_stamp: String,
}

impl Default for IdentityRole {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: None,
            normalized_name: None,
            concurrency_stamp: Uuid::now_v7().to_string(),
        }
    }
}

impl IdentityRole {
    /// Creates a new role with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the normalized name.
    #[must_use]
    pub fn with_normalized_name(mut self, name: impl Into<String>) -> Self {
        self.normalized_name = Some(name.into());
        self
    }
}

impl Document for IdentityRole {
    const COLLECTION: &'static str = "roles";

    fn id(&self) -> &str {
        &self.id
    }
}
