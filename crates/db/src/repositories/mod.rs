use async_trait::async_trait;
use thiserror::Error;

use orderdesk_core::{OrderId, OrderRecord, OrderSummary, UserId};

pub mod memory;
pub mod order;

pub use memory::InMemoryOrderRepository;
pub use order::SqlOrderRepository;

/// Upper bound on the candidate set shown to the resolver.
pub const RECENT_ORDER_LIMIT: i64 = 5;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read-only order access, always scoped by the requesting user. The
/// single-order lookup filters on both keys so a foreign order id resolves
/// to `None` rather than another tenant's record.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn recent_orders_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderSummary>, RepositoryError>;

    async fn find_order_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderRecord>, RepositoryError>;
}
