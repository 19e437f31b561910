//! Claims: typed assertions about a user.

use serde::{Deserialize, Serialize};

/// Well-known claim types.
pub mod claim_types {
    /// Role membership. The only claim type persisted on users.
    pub const ROLE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
    /// Display name.
    pub const NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
    /// Stable user identifier.
    pub const NAME_IDENTIFIER: &str =
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
    /// Email address.
    pub const EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
}

/// A `(type, value)` pair asserting a fact about a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Claim type URI.
    #[serde(rename = "type")]
    pub claim_type: String,
    /// Claim value.
    pub value: String,
}

impl Claim {
    /// Creates a claim of any type.
    #[must_use]
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Creates a role claim.
    #[must_use]
    pub fn role(value: impl Into<String>) -> Self {
        Self::new(claim_types::ROLE, value)
    }

    /// Checks if this is a role claim.
    #[must_use]
    pub fn is_role(&self) -> bool {
        self.claim_type == claim_types::ROLE
    }
}
