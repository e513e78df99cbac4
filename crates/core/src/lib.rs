pub mod config;
pub mod domain;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::order::{OrderId, OrderRecord, OrderStatus, OrderSummary, UserId};
pub use domain::user::UserContext;
