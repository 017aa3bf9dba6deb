use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::queries;
use crate::models::{InvoiceTotals, VendorSpend};

/// 聚合服务读取数据的接口
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 全部发票的 sum/count/avg, 不做空值归一化
    async fn invoice_totals(&self) -> Result<InvoiceTotals, sqlx::Error>;

    /// 供应商支出排名, 只包含至少有一张发票的供应商
    async fn vendor_spend(&self, limit: i64) -> Result<Vec<VendorSpend>, sqlx::Error>;
}

/// PostgreSQL 实现
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn invoice_totals(&self) -> Result<InvoiceTotals, sqlx::Error> {
        queries::invoice_totals(&self.pool).await
    }

    async fn vendor_spend(&self, limit: i64) -> Result<Vec<VendorSpend>, sqlx::Error> {
        queries::top_vendors_by_spend(&self.pool, limit).await
    }
}
