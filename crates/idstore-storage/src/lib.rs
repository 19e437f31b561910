//! # idstore-storage
//!
//! Capability traits for identity stores.
//!
//! The identity framework talks to a store through a set of small facet
//! traits. A backend implements [`UserStore`] and [`RoleStore`] and opts into
//! the facets it supports.
//!
//! ## User Facets
//!
//! - [`UserStore`] - CRUD, lookups and user name accessors
//! - [`UserPasswordStore`] - password hash
//! - [`UserEmailStore`] - email, confirmation and lookup by email
//! - [`UserPhoneNumberStore`] - phone number and confirmation
//! - [`UserTwoFactorStore`] - two-factor flag
//! - [`UserAuthenticatorKeyStore`] - authenticator app key
//! - [`UserTwoFactorRecoveryCodeStore`] - recovery codes
//! - [`UserClaimStore`] - role claims
//! - [`QueryableUserStore`] - enumeration
//!
//! ## Role Facets
//!
//! - [`RoleStore`] - CRUD, lookups and name accessors
//! - [`QueryableRoleStore`] - enumeration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod claims;
pub mod error;
pub mod result;
pub mod role;
pub mod user;

pub use claims::ClaimsAdded;
pub use error::{StorageError, StorageResult, ensure_active};
pub use result::{IdentityError, IdentityResult};
pub use role::{QueryableRoleStore, RoleStore};
pub use user::{
    QueryableUserStore, UserAuthenticatorKeyStore, UserClaimStore, UserEmailStore,
    UserPasswordStore, UserPhoneNumberStore, UserStore, UserTwoFactorRecoveryCodeStore,
    UserTwoFactorStore,
};
