use crate::models::{Invoice, InvoiceTotals, NewInvoice, Vendor, VendorSpend};
use sqlx::PgExecutor;

/// 发票总额、数量、均值 (单条语句, 同一快照)
pub async fn invoice_totals<'e, E: PgExecutor<'e>>(
    executor: E,
) -> Result<InvoiceTotals, sqlx::Error> {
    sqlx::query_as::<_, InvoiceTotals>(
        r#"
        SELECT SUM(total) AS total_spend,
               COUNT(*)   AS invoice_count,
               AVG(total) AS avg_value
        FROM invoices
        "#,
    )
    .fetch_one(executor)
    .await
}

/// 按供应商汇总支出 (支出降序, 同额按名称升序)
pub async fn top_vendors_by_spend<'e, E: PgExecutor<'e>>(
    executor: E,
    limit: i64,
) -> Result<Vec<VendorSpend>, sqlx::Error> {
    sqlx::query_as::<_, VendorSpend>(
        r#"
        SELECT v.name       AS name,
               SUM(i.total) AS spend
        FROM invoices i
        INNER JOIN vendors v ON v.id = i.vendor_id
        GROUP BY v.id, v.name
        ORDER BY spend DESC, v.name ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// 按名称插入或获取供应商
pub async fn upsert_vendor<'e, E: PgExecutor<'e>>(
    executor: E,
    name: &str,
) -> Result<Vendor, sqlx::Error> {
    sqlx::query_as::<_, Vendor>(
        r#"
        INSERT INTO vendors (name)
        VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(executor)
    .await
}

/// 插入一张发票
pub async fn insert_invoice<'e, E: PgExecutor<'e>>(
    executor: E,
    vendor_id: i64,
    invoice: &NewInvoice,
) -> Result<Invoice, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices (invoice_no, vendor_id, total)
        VALUES ($1, $2, $3)
        RETURNING id, invoice_no, vendor_id, total
        "#,
    )
    .bind(&invoice.invoice_no)
    .bind(vendor_id)
    .bind(&invoice.total)
    .fetch_one(executor)
    .await
}
