//! `PostgreSQL` document store.
//!
//! Each collection is stored in `<schema>.mt_doc_<collection>` with the
//! document body in a JSONB column. A session's queued writes run inside a
//! single transaction.

use async_trait::async_trait;
use idstore_core::Config;
use idstore_core::config::is_sql_identifier;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPool};
use sqlx::query::{Query, QueryAs};
use sqlx::types::Json;
use sqlx::{Postgres, Transaction};

use crate::document::{Document, Filter};
use crate::error::{DocumentError, DocumentResult, from_sqlx_error, is_unique_violation};
use crate::pool::create_pool;
use crate::session::{DocumentSession, DocumentStore, Operation, UnitOfWork};

/// Prefix of every document table.
pub const TABLE_PREFIX: &str = "mt_doc_";

/// `PostgreSQL` document store.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
}

impl PgDocumentStore {
    /// Creates a store over an existing pool.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidIdentifier` if `schema` is not a plain
    /// SQL identifier.
    pub fn new(pool: PgPool, schema: impl Into<String>) -> DocumentResult<Self> {
        let schema = schema.into();
        if !is_sql_identifier(&schema) {
            return Err(DocumentError::InvalidIdentifier(schema));
        }
        Ok(Self { pool, schema })
    }

    /// Connects using the database and schema settings of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created or the schema name is
    /// invalid.
    pub async fn connect(config: &Config) -> DocumentResult<Self> {
        let pool = create_pool(&config.database).await?;
        tracing::info!(schema = %config.schema.schema_name, "document store connected");
        Self::new(pool, config.schema.schema_name.clone())
    }

    /// Returns the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns the schema holding the document tables.
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Creates the schema and one table per collection if they are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a collection name is invalid or the DDL fails.
    pub async fn ensure_schema(&self, collections: &[&'static str]) -> DocumentResult<()> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", self.schema))
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

        for collection in collections {
            let table = table_name(&self.schema, collection)?;
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id TEXT PRIMARY KEY,
                    data JSONB NOT NULL,
                    last_modified TIMESTAMPTZ NOT NULL DEFAULT now()
                )"
            ))
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS {TABLE_PREFIX}{collection}_idx_data
                ON {table} USING gin (data jsonb_path_ops)"
            ))
            .execute(&self.pool)
            .await
            .map_err(from_sqlx_error)?;

            tracing::debug!(%table, "document table ensured");
        }

        Ok(())
    }
}

impl DocumentStore for PgDocumentStore {
    type Session = PgSession;

    fn open_session(&self) -> PgSession {
        PgSession {
            pool: self.pool.clone(),
            schema: self.schema.clone(),
            work: UnitOfWork::new(),
        }
    }
}

/// Session over a [`PgDocumentStore`].
#[derive(Debug)]
pub struct PgSession {
    pool: PgPool,
    schema: String,
    work: UnitOfWork,
}

/// Returns the qualified table name for a collection.
///
/// # Errors
///
/// Returns `DocumentError::InvalidIdentifier` if the result would not be a
/// plain identifier.
pub fn table_name(schema: &str, collection: &str) -> DocumentResult<String> {
    let table = format!("{TABLE_PREFIX}{collection}");
    if !is_sql_identifier(schema) {
        return Err(DocumentError::InvalidIdentifier(schema.to_string()));
    }
    if !is_sql_identifier(&table) {
        return Err(DocumentError::InvalidIdentifier(table));
    }
    Ok(format!("{schema}.{table}"))
}

/// SQL predicate for a filter. Field and value bind to `$1` and `$2`.
const fn predicate(filter: &Filter) -> &'static str {
    match filter {
        Filter::All => "TRUE",
        Filter::Eq { .. } => "data ->> $1 = $2",
        Filter::Contains { .. } => "(data -> $1) @> jsonb_build_array($2::text)",
    }
}

fn select_sql(table: &str, filter: &Filter, limit_one: bool) -> String {
    let limit = if limit_one { " LIMIT 1" } else { "" };
    format!(
        "SELECT data FROM {table} WHERE {} ORDER BY id{limit}",
        predicate(filter)
    )
}

fn bind_select<'q>(
    query: QueryAs<'q, Postgres, (Json<Value>,), PgArguments>,
    filter: &'q Filter,
) -> QueryAs<'q, Postgres, (Json<Value>,), PgArguments> {
    match filter {
        Filter::All => query,
        Filter::Eq { field, value } | Filter::Contains { field, value } => {
            query.bind(*field).bind(value.as_str())
        }
    }
}

fn bind_delete<'q>(
    query: Query<'q, Postgres, PgArguments>,
    filter: &'q Filter,
) -> Query<'q, Postgres, PgArguments> {
    match filter {
        Filter::All => query,
        Filter::Eq { field, value } | Filter::Contains { field, value } => {
            query.bind(*field).bind(value.as_str())
        }
    }
}

fn decode<T: Document>(rows: Vec<(Json<Value>,)>) -> DocumentResult<Vec<T>> {
    rows.into_iter()
        .map(|(Json(data),)| serde_json::from_value(data).map_err(DocumentError::from))
        .collect()
}

impl PgSession {
    async fn fetch<T: Document>(&self, filter: &Filter, limit_one: bool) -> DocumentResult<Vec<T>> {
        let table = table_name(&self.schema, T::COLLECTION)?;
        let sql = select_sql(&table, filter, limit_one);
        let rows = bind_select(sqlx::query_as(&sql), filter)
            .fetch_all(&self.pool)
            .await
            .map_err(from_sqlx_error)?;
        decode(rows)
    }

    async fn execute(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        operation: Operation,
    ) -> DocumentResult<()> {
        let table = table_name(&self.schema, operation.collection())?;
        match operation {
            Operation::Upsert { id, data, .. } => {
                sqlx::query(&format!(
                    "INSERT INTO {table} (id, data, last_modified) VALUES ($1, $2, now())
                    ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data, last_modified = now()"
                ))
                .bind(&id)
                .bind(Json(&data))
                .execute(&mut **tx)
                .await
                .map_err(from_sqlx_error)?;
            }
            Operation::Insert {
                collection,
                id,
                data,
            } => {
                let result = sqlx::query(&format!(
                    "INSERT INTO {table} (id, data, last_modified) VALUES ($1, $2, now())"
                ))
                .bind(&id)
                .bind(Json(&data))
                .execute(&mut **tx)
                .await;

                match result {
                    Ok(_) => {}
                    Err(err) if is_unique_violation(&err) => {
                        return Err(DocumentError::duplicate(collection, id));
                    }
                    Err(err) => return Err(from_sqlx_error(err)),
                }
            }
            Operation::Update {
                collection,
                id,
                data,
            } => {
                let result = sqlx::query(&format!(
                    "UPDATE {table} SET data = $2, last_modified = now() WHERE id = $1"
                ))
                .bind(&id)
                .bind(Json(&data))
                .execute(&mut **tx)
                .await
                .map_err(from_sqlx_error)?;

                if result.rows_affected() == 0 {
                    return Err(DocumentError::not_found(collection, id));
                }
            }
            Operation::Delete { id, .. } => {
                sqlx::query(&format!("DELETE FROM {table} WHERE id = $1"))
                    .bind(&id)
                    .execute(&mut **tx)
                    .await
                    .map_err(from_sqlx_error)?;
            }
            Operation::DeleteWhere { filter, .. } => {
                let sql = format!("DELETE FROM {table} WHERE {}", predicate(&filter));
                bind_delete(sqlx::query(&sql), &filter)
                    .execute(&mut **tx)
                    .await
                    .map_err(from_sqlx_error)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentSession for PgSession {
    fn work(&mut self) -> &mut UnitOfWork {
        &mut self.work
    }

    async fn load<T: Document>(&self, id: &str) -> DocumentResult<Option<T>> {
        let table = table_name(&self.schema, T::COLLECTION)?;
        let row: Option<(Json<Value>,)> =
            sqlx::query_as(&format!("SELECT data FROM {table} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(from_sqlx_error)?;

        row.map(|(Json(data),)| serde_json::from_value(data))
            .transpose()
            .map_err(DocumentError::from)
    }

    async fn query<T: Document>(&self, filter: &Filter) -> DocumentResult<Vec<T>> {
        self.fetch(filter, false).await
    }

    async fn first<T: Document>(&self, filter: &Filter) -> DocumentResult<Option<T>> {
        Ok(self.fetch::<T>(filter, true).await?.into_iter().next())
    }

    async fn save_changes(&mut self) -> DocumentResult<()> {
        let operations = self.work.drain();
        if operations.is_empty() {
            return Ok(());
        }
        let count = operations.len();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DocumentError::Transaction(e.to_string()))?;

        for operation in operations {
            // Dropping `tx` on error rolls the batch back.
            self.execute(&mut tx, operation).await?;
        }

        tx.commit()
            .await
            .map_err(|e| DocumentError::Transaction(e.to_string()))?;

        tracing::debug!(operations = count, schema = %self.schema, "unit of work committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_qualified() {
        assert_eq!(
            table_name("aspnetidentity", "users").unwrap(),
            "aspnetidentity.mt_doc_users"
        );
    }

    #[test]
    fn table_names_reject_injection() {
        assert!(table_name("public; drop", "users").is_err());
        assert!(table_name("public", "users--").is_err());
    }

    #[test]
    fn select_sql_per_filter() {
        let table = "s.mt_doc_users";

        assert_eq!(
            select_sql(table, &Filter::All, false),
            "SELECT data FROM s.mt_doc_users WHERE TRUE ORDER BY id"
        );
        assert_eq!(
            select_sql(table, &Filter::eq("normalizedEmail", "A@B"), true),
            "SELECT data FROM s.mt_doc_users WHERE data ->> $1 = $2 ORDER BY id LIMIT 1"
        );
        assert!(
            select_sql(table, &Filter::contains("roleClaims", "IsAdmin"), false)
                .contains("@> jsonb_build_array($2::text)")
        );
    }

    #[tokio::test]
    async fn store_rejects_invalid_schema() {
        let config = idstore_core::DatabaseConfig {
            min_connections: 0,
            ..idstore_core::DatabaseConfig::default()
        };
        let pool = crate::pool::create_lazy_pool(&config).unwrap();

        let err = PgDocumentStore::new(pool, "bad-schema").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidIdentifier(_)));
    }
}
