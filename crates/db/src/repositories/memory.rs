use async_trait::async_trait;

use orderdesk_core::{OrderId, OrderRecord, OrderSummary, UserId};

use super::{OrderRepository, RepositoryError, RECENT_ORDER_LIMIT};

/// Deterministic in-memory double for pipeline and runtime tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Vec<OrderRecord>,
}

impl InMemoryOrderRepository {
    pub fn with_orders(orders: Vec<OrderRecord>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn recent_orders_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let mut owned: Vec<&OrderRecord> =
            self.orders.iter().filter(|order| order.user_id == user_id).collect();
        owned.sort_by(|a, b| b.date_purchase.cmp(&a.date_purchase));
        owned.truncate(RECENT_ORDER_LIMIT as usize);

        Ok(owned
            .into_iter()
            .map(|order| OrderSummary {
                order_id: order.order_id,
                status: order.status.clone(),
                date_purchase: order.date_purchase,
                date_shipped: order.date_shipped,
                date_delivered: order.date_delivered,
            })
            .collect())
    }

    async fn find_order_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderRecord>, RepositoryError> {
        Ok(self
            .orders
            .iter()
            .find(|order| order.user_id == user_id && order.order_id == order_id)
            .cloned())
    }
}
