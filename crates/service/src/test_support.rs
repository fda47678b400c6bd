#![cfg(test)]
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use models::db::{connect_with_config, migrate, DatabaseConfig};

// Migrations run once per test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> Option<DatabaseConfig> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(DatabaseConfig { url, max_connections: 5, min_connections: 1, acquire_timeout_secs: 10, ..Default::default() })
}

/// Connection for DB-backed tests, or `None` when no database is configured or reachable.
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let Some(cfg) = test_config() else { return Ok(None) };

    let migrated = *MIGRATED
        .get_or_init(|| async {
            match connect_with_config(&cfg).await {
                Ok(db) => match migrate(&db).await {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("skip: migrate up failed: {e}");
                        false
                    }
                },
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {e}");
                    false
                }
            }
        })
        .await;
    if !migrated {
        return Ok(None);
    }

    // fresh connection bound to the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
