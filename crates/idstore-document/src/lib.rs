//! # idstore-document
//!
//! Document session gateway used by the idstore storage adapters.
//!
//! A [`DocumentStore`] hands out [`DocumentSession`]s. A session is one unit
//! of work: writes are queued with `store`/`insert`/`update`/`delete` and
//! applied together by `save_changes`, reads go straight to the backend.
//!
//! ## Backends
//!
//! - [`InMemoryDocumentStore`] - process-local store for tests and tooling
//! - [`PgDocumentStore`] - one JSONB table per collection in Postgres

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod provision;
pub mod session;

pub use document::{Document, Filter};
pub use error::{DocumentError, DocumentResult};
pub use memory::{InMemoryDocumentStore, InMemorySession};
pub use pool::create_pool;
pub use postgres::{PgDocumentStore, PgSession};
pub use provision::provision_database;
pub use session::{DocumentSession, DocumentStore, Operation, UnitOfWork};
