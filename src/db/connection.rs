//! Database connection management using sqlx

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, warn};

use crate::error::{ImportError, Result};

const CONNECT_ATTEMPTS: u32 = 10;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Initialize the database connection pool.
///
/// The database may still be starting when the importer runs, so the
/// liveness probe is retried once a second before giving up.
pub async fn init_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_lazy(database_url)
        .map_err(|e| ImportError::Connection(format!("{}", e)))?;

    let mut remaining_tries = CONNECT_ATTEMPTS;
    loop {
        match sqlx::query("SELECT 1").execute(&pool).await {
            Ok(_) => {
                debug!(
                    "database reachable after {} probe(s)",
                    CONNECT_ATTEMPTS - remaining_tries + 1
                );
                return Ok(pool);
            }
            Err(e) => {
                remaining_tries -= 1;
                if remaining_tries == 0 {
                    return Err(ImportError::Connection(format!("{}", e)));
                }
                warn!("database not ready, retrying: {}", e);
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
