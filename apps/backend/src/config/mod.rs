pub mod app;
pub mod db;

pub use app::{AppConfig, PaymentConfig, StoreBackend};
