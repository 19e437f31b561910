//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::OutputFormat;

/// idstore - administration tool for document-backed identity stores.
#[derive(Debug, Parser)]
#[command(name = "idstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database URL (overrides environment and config file).
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Schema holding the document tables (overrides environment and config file).
    #[arg(long, global = true)]
    pub schema: Option<String>,

    /// TOML configuration file. When absent, settings come from the environment.
    #[arg(short, long, env = "IDSTORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Schema and database provisioning.
    #[command(subcommand)]
    Schema(SchemaCommand),

    /// User management commands.
    #[command(subcommand)]
    User(UserCommand),

    /// Role management commands.
    #[command(subcommand)]
    Role(RoleCommand),

    /// Delete every user or every role.
    Wipe(WipeArgs),
}

/// Schema commands.
#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// Create the schema and the document tables.
    Init,

    /// Create the database if it does not exist.
    Provision {
        /// Connection URL with rights to create databases.
        #[arg(long, env = "IDSTORE_ADMIN_DATABASE_URL")]
        admin_url: String,

        /// Name of the database to create.
        #[arg(long)]
        database: String,
    },
}

/// Field used to look a user up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UserLookup {
    /// Document id.
    #[default]
    Id,
    /// User name, normalized before the lookup.
    Name,
    /// Email, normalized before the lookup.
    Email,
}

/// Field used to look a role up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RoleLookup {
    /// Document id.
    #[default]
    Id,
    /// Role name, normalized before the lookup.
    Name,
}

/// User commands.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user.
    Create {
        /// User name.
        user_name: String,

        /// Email address.
        #[arg(long)]
        email: Option<String>,

        /// Phone number.
        #[arg(long)]
        phone: Option<String>,

        /// Pre-computed password hash.
        #[arg(long)]
        password_hash: Option<String>,
    },

    /// Show one user.
    Get {
        /// Id, user name or email, depending on `--by`.
        key: String,

        /// Field to look up.
        #[arg(long, value_enum, default_value = "id")]
        by: UserLookup,
    },

    /// List every user.
    List,

    /// Delete a user.
    Delete {
        /// User id.
        id: String,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },

    /// List a user's role claims.
    Claims {
        /// User id.
        id: String,
    },

    /// Add role claims to a user.
    AddClaims {
        /// User id.
        id: String,

        /// Role values to add.
        #[arg(required = true)]
        roles: Vec<String>,
    },

    /// Remove role claims from a user.
    RemoveClaims {
        /// User id.
        id: String,

        /// Role values to remove.
        #[arg(required = true)]
        roles: Vec<String>,
    },

    /// Replace one role claim of a user.
    ReplaceClaim {
        /// User id.
        id: String,

        /// Role value to replace.
        old: String,

        /// New role value.
        new: String,
    },

    /// List the users holding a role claim.
    ForClaim {
        /// Role value.
        role: String,
    },
}

/// Role commands.
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// Create a role.
    Create {
        /// Role name.
        name: String,
    },

    /// Show one role.
    Get {
        /// Id or name, depending on `--by`.
        key: String,

        /// Field to look up.
        #[arg(long, value_enum, default_value = "id")]
        by: RoleLookup,
    },

    /// List every role.
    List,

    /// Delete a role.
    Delete {
        /// Role id.
        id: String,

        /// Skip confirmation.
        #[arg(long)]
        force: bool,
    },
}

/// Collections that can be wiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WipeTarget {
    /// Every user.
    Users,
    /// Every role.
    Roles,
}

/// Arguments of the wipe command.
#[derive(Debug, clap::Args)]
pub struct WipeArgs {
    /// What to delete.
    #[arg(value_enum)]
    pub target: WipeTarget,

    /// Skip confirmation.
    #[arg(long)]
    pub force: bool,
}
