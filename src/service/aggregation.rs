use std::sync::Arc;

use crate::db::RecordStore;
use crate::error::{AppError, AppResult};
use crate::models::{OverviewStats, VendorSpend};

/// 默认排名长度
pub const TOP_VENDORS: usize = 10;
/// 排名长度上限
pub const MAX_TOP_VENDORS: usize = 100;

/// 聚合服务: 只读统计, 不修改数据
pub struct AggregationService {
    store: Arc<dyn RecordStore>,
}

impl AggregationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// 总览统计
    ///
    /// 存储层读取失败返回 `StoreUnavailable`, 不会用全 0 的结果掩盖错误;
    /// 只有确实没有发票时才返回全 0。
    pub async fn overview_stats(&self) -> AppResult<OverviewStats> {
        let totals = self.store.invoice_totals().await?;
        Ok(OverviewStats::from_totals(totals))
    }

    /// 支出前 10 的供应商
    pub async fn top_vendors_by_spend(&self) -> AppResult<Vec<VendorSpend>> {
        self.top_vendors(TOP_VENDORS).await
    }

    /// 支出前 `limit` 的供应商, 支出降序, 同额按名称升序
    pub async fn top_vendors(&self, limit: usize) -> AppResult<Vec<VendorSpend>> {
        if limit == 0 || limit > MAX_TOP_VENDORS {
            return Err(AppError::InvalidLimit {
                got: limit,
                max: MAX_TOP_VENDORS,
            });
        }
        let ranking = self.store.vendor_spend(limit as i64).await?;
        tracing::debug!("vendor ranking: {} of at most {} vendors", ranking.len(), limit);
        Ok(ranking)
    }
}
