pub mod pool;
pub mod queries;
pub mod schema;
pub mod store;

pub use pool::create_pool;
pub use schema::ensure_schema;
pub use store::{PgStore, RecordStore};
