use bigdecimal::{BigDecimal, Zero};
use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// 发票表的原始聚合结果, 空表时 sum/avg 为 NULL
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceTotals {
    pub total_spend: Option<BigDecimal>,
    pub invoice_count: i64,
    pub avg_value: Option<BigDecimal>,
}

/// 总览统计
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    #[serde(serialize_with = "as_number")]
    pub total_spend: BigDecimal,
    pub total_invoices: i64,
    #[serde(serialize_with = "as_number")]
    pub avg_invoice_value: BigDecimal,
}

impl OverviewStats {
    /// 归一化: 没有发票时总额与均值都是 0, 而不是 NULL
    pub fn from_totals(totals: InvoiceTotals) -> Self {
        if totals.invoice_count == 0 {
            return Self::empty();
        }
        Self {
            total_spend: totals.total_spend.unwrap_or_else(BigDecimal::zero),
            total_invoices: totals.invoice_count,
            avg_invoice_value: totals.avg_value.unwrap_or_else(BigDecimal::zero),
        }
    }

    pub fn empty() -> Self {
        Self {
            total_spend: BigDecimal::zero(),
            total_invoices: 0,
            avg_invoice_value: BigDecimal::zero(),
        }
    }
}

/// 供应商支出排名项
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct VendorSpend {
    pub name: String,
    #[serde(serialize_with = "as_number")]
    pub spend: BigDecimal,
}

/// 金额以 JSON number 输出
///
/// 经十进制字符串转换, 得到最接近的 f64 (19.99 -> 19.99)。
fn as_number<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    match value.to_string().parse::<f64>() {
        Ok(v) if v.is_finite() => serializer.serialize_f64(v),
        _ => Err(serde::ser::Error::custom(format!(
            "amount {} is out of range",
            value
        ))),
    }
}
