pub mod aggregation;
pub mod bridge;
pub mod ingest;
pub mod oracle;

pub use aggregation::AggregationService;
pub use bridge::QueryBridge;
pub use oracle::{HttpOracle, SqlOracle};
