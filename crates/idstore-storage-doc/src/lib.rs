//! # idstore-storage-doc
//!
//! Identity stores over a [`DocumentStore`](idstore_document::DocumentStore).
//!
//! Each operation opens its own session, performs one read or one write
//! batch and commits before returning. Nothing is cached between calls.
//!
//! ## Stores
//!
//! - [`DocumentUserStore`] - users, their attributes and role claims
//! - [`DocumentRoleStore`] - roles

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod outcome;
pub mod role;
pub mod user;

pub use role::DocumentRoleStore;
pub use user::DocumentUserStore;
