pub mod chat;
pub mod stats;
pub mod vendor;

pub use chat::{ChatAnswer, ChatRequest, OracleReply, OracleRequest, Row};
pub use stats::{InvoiceTotals, OverviewStats, VendorSpend};
pub use vendor::{Invoice, NewInvoice, Vendor};
