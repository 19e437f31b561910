//! User record.
//!
//! Users are created by the hosting identity framework and handed to the
//! store for persistence. The store never assigns or rewrites the id.

use idstore_document::Document;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claim::Claim;

/// Serialized field names usable in document filters.
pub mod fields {
    /// Document id.
    pub const ID: &str = "id";
    /// Normalized user name.
    pub const NORMALIZED_USER_NAME: &str = "normalizedUserName";
    /// Normalized email.
    pub const NORMALIZED_EMAIL: &str = "normalizedEmail";
    /// Flattened role-claim values.
    pub const ROLE_CLAIMS: &str = "roleClaims";
}

/// An identity user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct IdentityUser {
    // === Identity ===
    /// Unique identifier, fixed at construction.
    pub id: String,
    /// User name as entered.
    pub user_name: Option<String>,
    /// User name lookup key.
    pub normalized_user_name: Option<String>,

    // === Contact ===
    /// Email address.
    pub email: Option<String>,
    /// Email lookup key.
    pub normalized_email: Option<String>,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Whether the phone number has been confirmed.
    pub phone_number_confirmed: bool,

    // === Security ===
    /// Opaque password hash.
    pub password_hash: Option<String>,
    /// Changes whenever credentials change.
    pub security_stamp: Option<String>,
    /// Changes whenever the record is persisted by the framework.
    pub concurrency_stamp: String,
    /// Whether two-factor authentication is enabled.
    pub two_factor_enabled: bool,
    /// Shared secret for authenticator apps.
    pub authenticator_key: Option<String>,
    /// Unredeemed two-factor recovery codes.
    #[serde(default)]
    pub recovery_codes: Vec<String>,

    // === Claims ===
    /// Role-claim values. Duplicates are allowed.
    #[serde(default)]
    pub role_claims: Vec<String>,
}

impl Default for IdentityUser {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            user_name: None,
            normalized_user_name: None,
            email: None,
            normalized_email: None,
            email_confirmed: false,
            phone_number: None,
            phone_number_confirmed: false,
            password_hash: None,
            security_stamp: None,
            concurrency_stamp: Uuid::now_v7().to_string(),
            two_factor_enabled: false,
            authenticator_key: None,
            recovery_codes: Vec::new(),
            role_claims: Vec::new(),
        }
    }
}

impl IdentityUser {
    /// Creates a new user with a fresh id.
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            ..Self::default()
        }
    }

    /// Sets the normalized user name.
    #[must_use]
    pub fn with_normalized_user_name(mut self, name: impl Into<String>) -> Self {
        self.normalized_user_name = Some(name.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the normalized email.
    #[must_use]
    pub fn with_normalized_email(mut self, email: impl Into<String>) -> Self {
        self.normalized_email = Some(email.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Sets the password hash.
    #[must_use]
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Adds a role-claim value.
    #[must_use]
    pub fn with_role_claim(mut self, value: impl Into<String>) -> Self {
        self.role_claims.push(value.into());
        self
    }

    /// Returns the role claims as typed claims.
    #[must_use]
    pub fn claims(&self) -> Vec<Claim> {
        self.role_claims.iter().map(Claim::role).collect()
    }

    /// Checks if the user carries a role-claim value.
    #[must_use]
    pub fn has_role_claim(&self, value: &str) -> bool {
        self.role_claims.iter().any(|c| c == value)
    }
}

impl Document for IdentityUser {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}
