use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

pub mod collection;

pub use collection::{Collection, Document};

/// Errors from the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for unique index {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// The five document collections this API serves.
pub const COLLECTIONS: &[&str] = &["users", "categories", "courses", "units", "faqs"];

/// Create the collection tables and uniqueness backstops if absent.
/// Each collection is a table of `(id UUID, doc JSONB)` rows.
pub async fn init(pool: &PgPool) -> Result<(), StoreError> {
    for name in COLLECTIONS {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (id UUID PRIMARY KEY, doc JSONB NOT NULL)",
            name
        );
        sqlx::query(&sql).execute(pool).await?;
    }

    // Unique document fields enforced at the store as a backstop to the
    // pre-insert lookups in the handlers
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users ((doc->>'email'))")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS categories_name_key ON categories ((doc->>'name'))",
    )
    .execute(pool)
    .await?;

    info!("document collections ready: {}", COLLECTIONS.join(", "));
    Ok(())
}
