//! Database provisioning.
//!
//! Creates the tenant database on first use, mirroring what a hosted
//! deployment would otherwise do by hand.

use idstore_core::SchemaConfig;
use idstore_core::config::is_sql_identifier;
use sqlx::{Connection, PgConnection};

use crate::error::{DocumentError, DocumentResult, from_sqlx_error};

/// Returns the name Postgres stores for an unquoted identifier.
fn folded(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Builds the `CREATE DATABASE` statement for a tenant.
///
/// Names are emitted unquoted and lower-cased, which is how Postgres records
/// them in `pg_database`.
///
/// # Errors
///
/// Returns `DocumentError::InvalidIdentifier` if the database or owner name
/// is not a plain SQL identifier.
pub fn create_database_sql(database: &str, schema: &SchemaConfig) -> DocumentResult<String> {
    if !is_sql_identifier(database) {
        return Err(DocumentError::InvalidIdentifier(database.to_string()));
    }
    if !is_sql_identifier(&schema.database_owner) {
        return Err(DocumentError::InvalidIdentifier(
            schema.database_owner.clone(),
        ));
    }
    Ok(format!(
        "CREATE DATABASE {} WITH OWNER {} ENCODING 'UTF8' CONNECTION LIMIT {}",
        folded(database),
        folded(&schema.database_owner),
        schema.connection_limit
    ))
}

/// Creates `database` through an administrative connection unless it exists.
///
/// Returns `true` when the database was created.
///
/// # Errors
///
/// Returns an error if the names are invalid or any statement fails.
pub async fn provision_database(
    admin_url: &str,
    database: &str,
    schema: &SchemaConfig,
) -> DocumentResult<bool> {
    let sql = create_database_sql(database, schema)?;
    let database = folded(database);

    let mut conn = PgConnection::connect(admin_url)
        .await
        .map_err(|e| DocumentError::Connection(e.to_string()))?;

    let existing: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&database)
        .fetch_optional(&mut conn)
        .await
        .map_err(from_sqlx_error)?;

    let created = if existing.is_some() {
        tracing::debug!(%database, "database already present");
        false
    } else {
        sqlx::query(&sql)
            .execute(&mut conn)
            .await
            .map_err(from_sqlx_error)?;
        tracing::info!(%database, owner = %schema.database_owner, "Postgres database created");
        true
    };

    conn.close().await.map_err(from_sqlx_error)?;
    Ok(created)
}
