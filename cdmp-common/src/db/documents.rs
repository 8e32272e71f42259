//! Per-user JSON document store
//!
//! Documents are opaque JSON values addressed by collection name and document
//! id (the owning user's id for index documents). Reads and writes touch a
//! single row; there are no transactions across documents.

use crate::Result;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::debug;

/// Document store backed by the `documents` table
#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

impl DocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fetch a document, `None` if it does not exist
    pub async fn get(&self, collection: &str, doc_id: &str) -> Result<Option<Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT data FROM documents WHERE collection = ? AND doc_id = ?")
                .bind(collection)
                .bind(doc_id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data)?)),
            None => {
                debug!("No document {}/{}", collection, doc_id);
                Ok(None)
            }
        }
    }

    /// Create or replace a document
    pub async fn set(&self, collection: &str, doc_id: &str, data: &Value) -> Result<()> {
        let encoded = serde_json::to_string(data)?;
        sqlx::query(
            r#"
            INSERT INTO documents (collection, doc_id, data, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(collection, doc_id)
            DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(doc_id)
        .bind(encoded)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!("Stored document {}/{}", collection, doc_id);
        Ok(())
    }
}
