use sqlx::PgPool;

const CREATE_VENDORS: &str = r#"
    CREATE TABLE IF NOT EXISTS vendors (
        id   BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )
"#;

const CREATE_INVOICES: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id         BIGSERIAL PRIMARY KEY,
        invoice_no TEXT NOT NULL,
        vendor_id  BIGINT NOT NULL REFERENCES vendors (id),
        total      NUMERIC(14, 2) NOT NULL
    )
"#;

const CREATE_INVOICES_VENDOR_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_invoices_vendor_id ON invoices (vendor_id)";

/// 建表 (幂等)
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_VENDORS, CREATE_INVOICES, CREATE_INVOICES_VENDOR_INDEX] {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("schema ready");
    Ok(())
}
