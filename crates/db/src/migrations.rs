use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::run_pending;
    use crate::connect_in_memory;

    #[tokio::test]
    async fn migrations_create_orders_schema() {
        let pool = connect_in_memory().await.expect("in-memory sqlite should connect");
        run_pending(&pool).await.expect("migrations should apply cleanly");

        let rows = sqlx::query(
            "SELECT name FROM sqlite_master \
             WHERE type IN ('table', 'index') AND name IN ('orders', 'idx_orders_user_purchase')",
        )
        .fetch_all(&pool)
        .await
        .expect("schema query should succeed");

        let names: Vec<String> =
            rows.iter().map(|row| row.get::<String, _>("name")).collect();
        assert!(names.contains(&"orders".to_string()));
        assert!(names.contains(&"idx_orders_user_purchase".to_string()));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.expect("in-memory sqlite should connect");
        run_pending(&pool).await.expect("first run");
        run_pending(&pool).await.expect("second run should be a no-op");
    }
}
