use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Invoiced,
    Shipped,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// Total parse: unknown statuses are carried through verbatim rather
    /// than rejected, since the store owns the status vocabulary.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "invoiced" => Self::Invoiced,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Invoiced => "invoiced",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only projection used as resolver context. Ordered by purchase date,
/// descending, bounded by the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub date_purchase: NaiveDateTime,
    pub date_shipped: Option<NaiveDateTime>,
    pub date_delivered: Option<NaiveDateTime>,
}

/// Authoritative single-order fetch result. Always re-validated against the
/// requesting user before any field reaches the answer composer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub date_purchase: NaiveDateTime,
    pub date_shipped: Option<NaiveDateTime>,
    pub date_delivered: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::OrderStatus;

    #[test]
    fn parses_known_statuses_case_insensitively() {
        assert_eq!(OrderStatus::parse("Delivered"), OrderStatus::Delivered);
        assert_eq!(OrderStatus::parse(" shipped "), OrderStatus::Shipped);
        assert_eq!(OrderStatus::parse("INVOICED"), OrderStatus::Invoiced);
    }

    #[test]
    fn carries_unknown_status_verbatim() {
        let status = OrderStatus::parse("backordered");
        assert_eq!(status, OrderStatus::Other("backordered".to_string()));
        assert_eq!(status.as_str(), "backordered");
    }
}
