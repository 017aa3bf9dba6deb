use bigdecimal::BigDecimal;
use sqlx::FromRow;

/// 供应商 (vendors), name 唯一
#[derive(Debug, Clone, FromRow)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
}

/// 发票 (invoices), 每张发票属于一个供应商
#[derive(Debug, Clone, FromRow)]
pub struct Invoice {
    pub id: i64,
    pub invoice_no: String,
    pub vendor_id: i64,
    pub total: BigDecimal,
}

/// 待写入的发票记录 (导入阶段使用)
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub vendor_name: String,
    pub invoice_no: String,
    pub total: BigDecimal,
}
