//! Postgres integration tests.
//!
//! These tests start an ephemeral PostgreSQL instance through
//! testcontainers and need a running Docker daemon:
//!
//! ```text
//! cargo test -p idstore-integration-tests -- --ignored
//! ```

mod document_store;
mod role_store;
mod user_store;
