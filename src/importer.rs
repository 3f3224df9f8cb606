//! Registry import orchestration.

use std::path::Path;

use sqlx::PgPool;
use tracing::{debug, info};

use crate::db::LanguageRepository;
use crate::error::{ImportError, Result};
use crate::registry::parse_language_entries;

/// Outcome of a single import run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// The table was already populated and the file was never read.
    pub skipped: bool,
    /// Records parsed from the registry file.
    pub records: usize,
    /// Rows inserted.
    pub inserted: usize,
    /// Records dropped because an earlier record claimed their description.
    pub duplicates: usize,
}

/// Load the registry file at `path` into the languages table.
///
/// The table is only written when it is empty; finding any rows makes the
/// whole run a no-op. All inserts go through one transaction committed at
/// the end, so a failed run leaves the table untouched.
pub async fn import_registry(pool: &PgPool, path: &Path) -> Result<ImportSummary> {
    let repo = LanguageRepository::new(pool.clone());

    // A database volume that already existed has the languages in place.
    let existing = repo.count().await?;
    if existing != 0 {
        info!(
            "languages table already holds {} rows, skipping import",
            existing
        );
        return Ok(ImportSummary {
            skipped: true,
            ..ImportSummary::default()
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let entries = parse_language_entries(&contents)?;

    let mut summary = ImportSummary {
        records: entries.len(),
        ..ImportSummary::default()
    };

    let mut tx = repo.begin().await?;
    for entry in &entries {
        // Some descriptions appear under more than one entry in the official
        // registry; the first occurrence keeps the row and its tag.
        if LanguageRepository::exists(&mut tx, &entry.description).await? {
            debug!(
                "duplicate description {:?}, keeping the earlier tag",
                entry.description
            );
            summary.duplicates += 1;
            continue;
        }

        LanguageRepository::insert(&mut tx, entry).await?;
        summary.inserted += 1;
    }
    tx.commit()
        .await
        .map_err(|e| ImportError::Database(format!("Failed to commit import: {}", e)))?;

    Ok(summary)
}
