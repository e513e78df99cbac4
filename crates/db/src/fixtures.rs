//! Deterministic demo dataset for local runs and end-to-end checks.
//!
//! The seed covers two users so ownership behavior is exercisable: the demo
//! user (id 6) with a mix of delivered/shipped/invoiced orders, and a second
//! user whose order must never surface in the demo user's replies.

use crate::repositories::RepositoryError;
use crate::DbPool;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedSummary {
    pub orders_inserted: u64,
    pub total_orders: i64,
}

struct SeedOrder {
    order_id: i64,
    user_id: i64,
    status: &'static str,
    date_purchase: &'static str,
    date_shipped: Option<&'static str>,
    date_delivered: Option<&'static str>,
}

const SEED_ORDERS: &[SeedOrder] = &[
    SeedOrder {
        order_id: 5,
        user_id: 6,
        status: "delivered",
        date_purchase: "2024-05-17 11:01:51",
        date_shipped: Some("2024-05-18 11:01:51"),
        date_delivered: Some("2024-05-28 11:01:51"),
    },
    SeedOrder {
        order_id: 7,
        user_id: 6,
        status: "shipped",
        date_purchase: "2024-06-02 09:14:30",
        date_shipped: Some("2024-06-03 16:40:12"),
        date_delivered: None,
    },
    SeedOrder {
        order_id: 9,
        user_id: 6,
        status: "invoiced",
        date_purchase: "2024-06-20 18:22:05",
        date_shipped: None,
        date_delivered: None,
    },
    SeedOrder {
        order_id: 3,
        user_id: 6,
        status: "delivered",
        date_purchase: "2024-03-11 08:05:44",
        date_shipped: Some("2024-03-12 10:00:00"),
        date_delivered: Some("2024-03-19 14:30:00"),
    },
    SeedOrder {
        order_id: 14,
        user_id: 6,
        status: "delivered",
        date_purchase: "2024-01-29 13:48:10",
        date_shipped: Some("2024-01-30 09:20:00"),
        date_delivered: Some("2024-02-06 17:05:00"),
    },
    SeedOrder {
        order_id: 2,
        user_id: 6,
        status: "delivered",
        date_purchase: "2023-11-04 10:12:00",
        date_shipped: Some("2023-11-05 12:00:00"),
        date_delivered: Some("2023-11-12 15:45:00"),
    },
    SeedOrder {
        order_id: 8,
        user_id: 12,
        status: "shipped",
        date_purchase: "2024-06-10 12:00:00",
        date_shipped: Some("2024-06-11 12:00:00"),
        date_delivered: None,
    },
];

pub struct DemoSeed;

impl DemoSeed {
    /// Insert the demo orders. Re-runnable: existing rows are left alone.
    pub async fn load(pool: &DbPool) -> Result<SeedSummary, RepositoryError> {
        let mut orders_inserted = 0u64;

        for order in SEED_ORDERS {
            let result = sqlx::query(
                "INSERT OR IGNORE INTO orders \
                 (order_id, user_id, status, date_purchase, date_shipped, date_delivered) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(order.order_id)
            .bind(order.user_id)
            .bind(order.status)
            .bind(order.date_purchase)
            .bind(order.date_shipped)
            .bind(order.date_delivered)
            .execute(pool)
            .await?;
            orders_inserted += result.rows_affected();
        }

        let (total_orders,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM orders").fetch_one(pool).await?;

        Ok(SeedSummary { orders_inserted, total_orders })
    }

    /// Check the dataset is present: both seed users must have orders.
    pub async fn verify(pool: &DbPool) -> Result<bool, RepositoryError> {
        let (seeded_users,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT user_id) FROM orders WHERE user_id IN (6, 12)",
        )
        .fetch_one(pool)
        .await?;

        Ok(seeded_users == 2)
    }
}
