use serde_json::Value;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::StoreError;

/// A stored document together with its server-assigned id.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub doc: Value,
}

/// Thin handle over one JSONB document collection. Every method is a single
/// store operation; callers decide how results map to HTTP.
pub struct Collection<'a> {
    name: &'static str,
    pool: &'a PgPool,
}

impl<'a> Collection<'a> {
    pub fn new(name: &'static str, pool: &'a PgPool) -> Self {
        Self { name, pool }
    }

    pub async fn insert(&self, id: Uuid, doc: &Value) -> Result<(), StoreError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.name);
        sqlx::query(&sql)
            .bind(id)
            .bind(doc)
            .execute(self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                    StoreError::Duplicate(db.constraint().unwrap_or(self.name).to_string())
                }
                _ => StoreError::Sqlx(e),
            })?;
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let sql = format!("SELECT id, doc FROM {} ORDER BY id", self.name);
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            documents.push(Document {
                id: row.try_get("id")?,
                doc: row.try_get("doc")?,
            });
        }
        Ok(documents)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Value>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", self.name);
        let row = sqlx::query(&sql).bind(id).fetch_optional(self.pool).await?;

        match row {
            Some(row) => Ok(Some(row.try_get("doc")?)),
            None => Ok(None),
        }
    }

    /// Look a document up by a top-level string field, e.g. a user by email.
    pub async fn find_by_field(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT id, doc FROM {} WHERE doc->>($1::text) = $2",
            self.name
        );
        let row = sqlx::query(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Document {
                id: row.try_get("id")?,
                doc: row.try_get("doc")?,
            })),
            None => Ok(None),
        }
    }

    /// Shallow-merge a patch into the stored document. Returns false when no
    /// document with that id exists.
    pub async fn merge(&self, id: Uuid, patch: &Value) -> Result<bool, StoreError> {
        let sql = format!("UPDATE {} SET doc = doc || $2 WHERE id = $1", self.name);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(patch)
            .execute(self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                    StoreError::Duplicate(db.constraint().unwrap_or(self.name).to_string())
                }
                _ => StoreError::Sqlx(e),
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no document with that id exists.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.name);
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
