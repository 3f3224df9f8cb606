//! Load a BCP47 language-subtag registry file into PostgreSQL.
//!
//! Run with: cargo run --bin import_languages -- <registry-file>
//!
//! The registry format is the one published at
//! https://www.iana.org/assignments/language-subtag-registry

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use langreg::config::DbConfig;
use langreg::db::init_pool;
use langreg::importer::import_registry;

#[derive(Parser)]
#[command(name = "import_languages")]
#[command(about = "Import BCP47 language subtags from an IANA registry file")]
struct Args {
    /// Path to the language-subtag registry file
    registry_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = DbConfig::from_env()?;
    info!(
        "connecting to {}:{}/{}",
        config.host, config.port, config.database
    );
    let pool = init_pool(&config.connection_url()).await?;

    let summary = import_registry(&pool, &args.registry_file).await?;
    if summary.skipped {
        info!("languages table already populated, nothing to do");
    } else {
        info!(
            "imported {} of {} registry records ({} duplicate descriptions skipped)",
            summary.inserted, summary.records, summary.duplicates
        );
    }

    Ok(())
}
