//! Languages repository for PostgreSQL operations
//!
//! The `languages` table is created by external setup (see
//! `sql/languages.sql`); this module only reads and inserts rows.

use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{ImportError, Result};
use crate::registry::LanguageEntry;

pub struct LanguageRepository {
    pool: PgPool,
}

impl LanguageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of rows currently in the languages table.
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT count(*) FROM languages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ImportError::Database(format!("Failed to count languages: {}", e)))
    }

    /// Open the transaction all of a run's inserts go through.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| ImportError::Database(format!("Failed to open transaction: {}", e)))
    }

    /// Check the transaction's view of the table for the description, so
    /// rows inserted earlier in the same uncommitted run are visible.
    pub async fn exists(tx: &mut Transaction<'_, Postgres>, description: &str) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM languages WHERE description = $1)")
            .bind(description)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| {
                ImportError::Database(format!(
                    "Failed to check for description {:?}: {}",
                    description, e
                ))
            })
    }

    pub async fn insert(tx: &mut Transaction<'_, Postgres>, entry: &LanguageEntry) -> Result<()> {
        sqlx::query("INSERT INTO languages (description, tag) VALUES ($1, $2)")
            .bind(&entry.description)
            .bind(&entry.tag)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                ImportError::Database(format!("Failed to insert language {}: {}", entry.tag, e))
            })?;

        Ok(())
    }
}
