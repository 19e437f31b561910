//! # idstore-core
//!
//! Configuration and error handling shared by the idstore crates.
//!
//! The document store, the storage adapters and the CLI all read their
//! connection and schema settings from [`Config`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Config, DatabaseConfig, SchemaConfig};
pub use error::{Error, Result};
