//! CLI configuration.

use clap::ValueEnum;
use idstore_core::{Config, Error};
use serde::{Deserialize, Serialize};

use crate::Cli;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

/// Resolves the store configuration for a command line.
///
/// The config file wins over the environment; `--database-url` and
/// `--schema` win over both.
///
/// ## Errors
///
/// Returns an error if the file cannot be read or the result is invalid.
pub fn load(cli: &Cli) -> crate::CliResult<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_toml_str(&std::fs::read_to_string(path)?),
        None => Config::from_env(),
    };
    let mut config = match base {
        Ok(config) => config,
        Err(Error::Missing(_)) if cli.database_url.is_some() => Config::default(),
        Err(e) => return Err(e.into()),
    };

    apply_overrides(&mut config, cli.database_url.as_deref(), cli.schema.as_deref());
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, database_url: Option<&str>, schema: Option<&str>) {
    if let Some(url) = database_url {
        config.database.url = url.to_string();
    }
    if let Some(schema) = schema {
        config.schema.schema_name = schema.to_string();
    }
}
