pub mod app_config;
pub mod customer;
pub mod money;
pub mod pii;

pub use app_config::Settings;
pub use customer::{CustomerId, CustomerStatus, StatusError};
pub use money::{Price, RoundingMode};
pub use pii::Masked;
