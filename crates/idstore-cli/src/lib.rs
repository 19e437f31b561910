//! # idstore-cli
//!
//! Administration tool for idstore identity stores.
//!
//! This crate provides command-line utilities for:
//! - Schema and database provisioning
//! - User management, including role claims
//! - Role management
//! - Wiping users or roles

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use context::Context;
pub use error::{CliError, CliResult};
