use chrono::NaiveDateTime;
use sqlx::FromRow;

use orderdesk_core::{OrderId, OrderRecord, OrderStatus, OrderSummary, UserId};

use super::{OrderRepository, RepositoryError, RECENT_ORDER_LIMIT};
use crate::DbPool;

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SummaryRow {
    order_id: i64,
    status: String,
    date_purchase: NaiveDateTime,
    date_shipped: Option<NaiveDateTime>,
    date_delivered: Option<NaiveDateTime>,
}

impl From<SummaryRow> for OrderSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            order_id: OrderId(row.order_id),
            status: OrderStatus::parse(&row.status),
            date_purchase: row.date_purchase,
            date_shipped: row.date_shipped,
            date_delivered: row.date_delivered,
        }
    }
}

#[derive(FromRow)]
struct RecordRow {
    order_id: i64,
    user_id: i64,
    status: String,
    date_purchase: NaiveDateTime,
    date_shipped: Option<NaiveDateTime>,
    date_delivered: Option<NaiveDateTime>,
}

impl From<RecordRow> for OrderRecord {
    fn from(row: RecordRow) -> Self {
        Self {
            order_id: OrderId(row.order_id),
            user_id: UserId(row.user_id),
            status: OrderStatus::parse(&row.status),
            date_purchase: row.date_purchase,
            date_shipped: row.date_shipped,
            date_delivered: row.date_delivered,
        }
    }
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn recent_orders_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT order_id, status, date_purchase, date_shipped, date_delivered \
             FROM orders \
             WHERE user_id = ?1 \
             ORDER BY date_purchase DESC \
             LIMIT ?2",
        )
        .bind(user_id.0)
        .bind(RECENT_ORDER_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderSummary::from).collect())
    }

    async fn find_order_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "SELECT order_id, user_id, status, date_purchase, date_shipped, date_delivered \
             FROM orders \
             WHERE user_id = ?1 AND order_id = ?2 \
             LIMIT 1",
        )
        .bind(user_id.0)
        .bind(order_id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OrderRecord::from))
    }
}
