//! Configuration management for idstore.
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file) or from a TOML document. Missing values fall back to the defaults
//! below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Schema and tenant provisioning settings.
    pub schema: SchemaConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Minimum number of pooled connections.
    pub min_connections: u32,
    /// Seconds to wait for a connection before giving up.
    pub connect_timeout_secs: u64,
    /// Seconds an idle connection is kept open.
    pub idle_timeout_secs: u64,
}

/// Schema and tenant provisioning settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Postgres schema holding the document tables.
    pub schema_name: String,
    /// Role that owns a freshly provisioned database.
    pub database_owner: String,
    /// Connection limit for a freshly provisioned database (`-1` = unlimited).
    pub connection_limit: i32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/idstore".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl DatabaseConfig {
    /// Returns the connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            schema_name: "aspnetidentity".to_string(),
            database_owner: "aspnetidentity".to_string(),
            connection_limit: -1,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// `IDSTORE_DATABASE_URL` wins over `DATABASE_URL`. Every other setting is
    /// optional.
    ///
    /// ## Errors
    ///
    /// Returns an error if no database URL is set or a numeric variable does
    /// not parse.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let url = std::env::var("IDSTORE_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map_err(|_| Error::Missing("IDSTORE_DATABASE_URL or DATABASE_URL".to_string()))?;

        let config = Self {
            database: DatabaseConfig {
                url,
                max_connections: env_parse(
                    "IDSTORE_DB_MAX_CONNECTIONS",
                    "max_connections",
                    defaults.database.max_connections,
                )?,
                min_connections: env_parse(
                    "IDSTORE_DB_MIN_CONNECTIONS",
                    "min_connections",
                    defaults.database.min_connections,
                )?,
                connect_timeout_secs: env_parse(
                    "IDSTORE_DB_CONNECT_TIMEOUT",
                    "connect_timeout_secs",
                    defaults.database.connect_timeout_secs,
                )?,
                idle_timeout_secs: env_parse(
                    "IDSTORE_DB_IDLE_TIMEOUT",
                    "idle_timeout_secs",
                    defaults.database.idle_timeout_secs,
                )?,
            },
            schema: SchemaConfig {
                schema_name: std::env::var("IDSTORE_SCHEMA")
                    .unwrap_or(defaults.schema.schema_name),
                database_owner: std::env::var("IDSTORE_DB_OWNER")
                    .unwrap_or(defaults.schema.database_owner),
                connection_limit: env_parse(
                    "IDSTORE_CONNECTION_LIMIT",
                    "connection_limit",
                    defaults.schema.connection_limit,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML document.
    ///
    /// ## Errors
    ///
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings for values the store cannot work with.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Invalid`] for an empty URL, an inverted pool range, or
    /// a schema/owner name that is not a plain SQL identifier.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(Error::invalid("url", "must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(Error::invalid("max_connections", "must be at least 1"));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(Error::invalid(
                "min_connections",
                "must not exceed max_connections",
            ));
        }
        if !is_sql_identifier(&self.schema.schema_name) {
            return Err(Error::invalid(
                "schema_name",
                format!("'{}' is not a valid identifier", self.schema.schema_name),
            ));
        }
        if !is_sql_identifier(&self.schema.database_owner) {
            return Err(Error::invalid(
                "database_owner",
                format!("'{}' is not a valid identifier", self.schema.database_owner),
            ));
        }
        if self.schema.connection_limit < -1 {
            return Err(Error::invalid("connection_limit", "must be -1 or greater"));
        }
        Ok(())
    }
}

/// Returns whether `name` is a lowercase-safe, unquoted SQL identifier.
///
/// Schema, table and role names are spliced into DDL, so only
/// `[A-Za-z_][A-Za-z0-9_]*` up to 63 bytes is accepted.
#[must_use]
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= 63
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn env_parse<T: std::str::FromStr>(var: &str, field: &'static str, default: T) -> Result<T> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::invalid(field, format!("{var}='{raw}' is not a number"))),
        Err(_) => Ok(default),
    }
}
