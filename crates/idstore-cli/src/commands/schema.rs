//! Schema and database provisioning commands.

use idstore_core::Config;
use idstore_document::{Document, PgDocumentStore, provision_database};
use idstore_model::{IdentityRole, IdentityUser};

use crate::cli::SchemaCommand;
use crate::output::{info, success};

/// Collections the stores write to.
pub const COLLECTIONS: [&str; 2] = [IdentityUser::COLLECTION, IdentityRole::COLLECTION];

/// Runs a schema command.
pub async fn run_schema(cmd: SchemaCommand, config: &Config) -> crate::CliResult<()> {
    match cmd {
        SchemaCommand::Init => {
            let store = PgDocumentStore::connect(config).await?;
            store.ensure_schema(&COLLECTIONS).await?;
            success(&format!(
                "Schema '{}' ready with tables for {}",
                store.schema(),
                COLLECTIONS.join(", ")
            ));
        }
        SchemaCommand::Provision {
            admin_url,
            database,
        } => {
            if provision_database(&admin_url, &database, &config.schema).await? {
                success(&format!(
                    "Database '{}' created (owner '{}')",
                    database, config.schema.database_owner
                ));
            } else {
                info(&format!("Database '{}' already exists", database));
            }
        }
    }
    Ok(())
}
