use std::io::Write;

use tempfile::NamedTempFile;

use langreg::config::DbConfig;
use langreg::db::init_pool;
use langreg::importer::import_registry;
use langreg::registry::{parse_language_entries, LanguageEntry};

/// Registry excerpt with one grandfathered record and one duplicated
/// description ("Klingon" appears under two tags).
const REGISTRY_FIXTURE: &str = "\
File-Date: 2026-01-01
%%
Type: language
Subtag: aa
Description: Afar
Added: 2005-10-16
%%
Type: language
Subtag: ab
Description: Abkhazian
Suppress-Script: Cyrl
%%
Type: grandfathered
Tag: i-klingon
Description: Klingon
Preferred-Value: tlh
%%
Type: language
Subtag: tlh
Description: Klingon
";

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_fixture_parses_in_file_order() {
    let file = write_fixture(REGISTRY_FIXTURE);
    let contents = std::fs::read_to_string(file.path()).unwrap();
    let entries = parse_language_entries(&contents).unwrap();

    // All four records survive parsing; deduplication is the importer's job,
    // and "first occurrence wins" is only meaningful if file order holds.
    assert_eq!(
        entries,
        vec![
            LanguageEntry {
                tag: "aa".to_string(),
                description: "afar".to_string(),
            },
            LanguageEntry {
                tag: "ab".to_string(),
                description: "abkhazian".to_string(),
            },
            LanguageEntry {
                tag: "i-klingon".to_string(),
                description: "klingon".to_string(),
            },
            LanguageEntry {
                tag: "tlh".to_string(),
                description: "klingon".to_string(),
            },
        ]
    );
}

#[test]
fn test_truncated_fixture_is_rejected() {
    // A block cut off before its Description field aborts parsing.
    let truncated = &REGISTRY_FIXTURE[..REGISTRY_FIXTURE.find("Description: Afar").unwrap()];
    assert!(parse_language_entries(truncated).is_err());
}

/// End-to-end import against a live database. Destructive: truncates the
/// languages table before running.
///
/// Needs `POSTGRES_DB`/`POSTGRES_USER`/`POSTGRES_PASSWORD` (a `.env` file
/// works) and the schema from `sql/languages.sql`.
#[tokio::test]
#[ignore = "requires a running PostgreSQL with the languages table"]
async fn test_import_end_to_end() {
    dotenv::dotenv().ok();
    let config = DbConfig::from_env().unwrap();
    let pool = init_pool(&config.connection_url()).await.unwrap();

    sqlx::query("TRUNCATE languages")
        .execute(&pool)
        .await
        .unwrap();

    let file = write_fixture(REGISTRY_FIXTURE);
    let summary = import_registry(&pool, file.path()).await.unwrap();
    assert!(!summary.skipped);
    assert_eq!(summary.records, 4);
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.duplicates, 1);

    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT description, tag FROM languages ORDER BY description")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        rows,
        vec![
            ("abkhazian".to_string(), "ab".to_string()),
            ("afar".to_string(), "aa".to_string()),
            // First occurrence in file order keeps the tag.
            ("klingon".to_string(), "i-klingon".to_string()),
        ]
    );

    // A second run sees the populated table and never touches the file.
    let summary = import_registry(&pool, file.path()).await.unwrap();
    assert!(summary.skipped);
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM languages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}
