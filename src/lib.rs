pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use crate::config::AppConfig;
pub use db::{create_pool, PgStore, RecordStore};
pub use error::{AppError, AppResult};
pub use service::{AggregationService, HttpOracle, QueryBridge, SqlOracle};
