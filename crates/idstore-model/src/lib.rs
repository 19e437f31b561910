//! # idstore-model
//!
//! Records persisted by the idstore adapters: users, roles and the claims
//! attached to users.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod claim;
pub mod normalizer;
pub mod role;
pub mod user;

pub use claim::{Claim, claim_types};
pub use normalizer::{LookupNormalizer, UpperInvariantNormalizer};
pub use role::IdentityRole;
pub use user::IdentityUser;
