use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;

use orderdesk_core::config::DatabaseConfig;

pub type DbPool = sqlx::SqlitePool;

/// Open the order store described by the configuration. WAL plus the busy
/// timeout lets the seed command and a chat session share the same file.
pub async fn connect(database: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    pool_options(database.max_connections, database.timeout_secs)
        .connect(&database.url)
        .await
}

/// Single-connection in-memory store for tests. One connection is required:
/// the database vanishes when its last connection closes.
pub async fn connect_in_memory() -> Result<DbPool, sqlx::Error> {
    pool_options(1, 5).connect("sqlite::memory:").await
}

fn pool_options(max_connections: u32, timeout_secs: u64) -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(timeout_secs.max(1)))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
                sqlx::query("PRAGMA busy_timeout = 5000").execute(&mut *conn).await?;
                Ok(())
            })
        })
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::*;

    #[tokio::test]
    async fn config_settings_drive_the_pool() {
        let database = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            timeout_secs: 5,
        };
        let pool = connect(&database).await.expect("in-memory sqlite should connect");

        let row = sqlx::query("PRAGMA busy_timeout")
            .fetch_one(&pool)
            .await
            .expect("pragma query");
        let timeout: i64 = row.get(0);
        assert_eq!(timeout, 5000);
    }

    #[tokio::test]
    async fn zero_connections_is_clamped_rather_than_rejected() {
        let database = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 0,
            timeout_secs: 5,
        };
        let pool = connect(&database).await.expect("in-memory sqlite should connect");
        assert_eq!(pool.size(), 1);
    }
}
