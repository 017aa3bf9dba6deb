use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::db::queries;
use crate::models::NewInvoice;

pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

const VENDOR_NAME: &str = "/extractedData/llmData/vendor/value/vendorName/value";
const INVOICE_NO: &str = "/extractedData/llmData/invoice/value/invoiceId/value";
const INVOICE_TOTAL: &str = "/extractedData/llmData/summary/value/invoiceTotal/value";

/// 导入错误, 只影响导入进程
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("source file not found: {0}")]
    SourceMissing(String),

    #[error("malformed source: {0}")]
    Malformed(String),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// 导入统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub vendors: usize,
    pub invoices: usize,
}

/// 读取并解析导入文件
pub fn load_file(path: &Path) -> Result<Vec<NewInvoice>, IngestError> {
    if !path.exists() {
        return Err(IngestError::SourceMissing(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| IngestError::Malformed(format!("{}: {}", path.display(), e)))?;
    parse_documents(&raw)
}

/// 把抽取结果 (JSON 数组) 转成待写入的发票
pub fn parse_documents(raw: &str) -> Result<Vec<NewInvoice>, IngestError> {
    let docs: Vec<Value> =
        serde_json::from_str(raw).map_err(|e| IngestError::Malformed(e.to_string()))?;

    docs.iter()
        .enumerate()
        .map(|(idx, doc)| parse_document(doc, idx + 1))
        .collect()
}

fn parse_document(doc: &Value, position: usize) -> Result<NewInvoice, IngestError> {
    let vendor_name = non_empty_str(doc, VENDOR_NAME)
        .unwrap_or(UNKNOWN_VENDOR)
        .to_string();
    let invoice_no = non_empty_str(doc, INVOICE_NO)
        .map(str::to_string)
        .unwrap_or_else(|| format!("INV-{:06}", position));
    let total = match doc.pointer(INVOICE_TOTAL) {
        None | Some(Value::Null) => BigDecimal::zero(),
        Some(Value::Number(n)) => parse_amount(&n.to_string(), position)?,
        Some(Value::String(s)) if s.trim().is_empty() => BigDecimal::zero(),
        Some(Value::String(s)) => parse_amount(s.trim(), position)?,
        Some(other) => {
            return Err(IngestError::Malformed(format!(
                "document {}: invoice total {} is not a number",
                position, other
            )))
        }
    };

    Ok(NewInvoice {
        vendor_name,
        invoice_no,
        total,
    })
}

fn non_empty_str<'a>(doc: &'a Value, pointer: &str) -> Option<&'a str> {
    doc.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_amount(raw: &str, position: usize) -> Result<BigDecimal, IngestError> {
    BigDecimal::from_str(raw).map_err(|_| {
        IngestError::Malformed(format!(
            "document {}: invoice total {:?} is not a number",
            position, raw
        ))
    })
}

/// 在一个事务内写入: 供应商按名称 upsert, 每条记录一张发票
pub async fn ingest(pool: &PgPool, records: &[NewInvoice]) -> Result<IngestSummary, IngestError> {
    let mut tx = pool.begin().await?;
    let mut vendor_ids: HashSet<i64> = HashSet::new();

    for (idx, record) in records.iter().enumerate() {
        let vendor = queries::upsert_vendor(&mut *tx, &record.vendor_name).await?;
        vendor_ids.insert(vendor.id);
        let invoice = queries::insert_invoice(&mut *tx, vendor.id, record).await?;
        tracing::debug!("invoice {} -> vendor {}", invoice.invoice_no, vendor.name);

        let current = idx + 1;
        if current % 100 == 0 {
            tracing::info!("导入进度: {}/{}", current, records.len());
        }
    }

    tx.commit().await?;
    Ok(IngestSummary {
        vendors: vendor_ids.len(),
        invoices: records.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_extract_vendor_invoice_and_total() {
        // given
        let raw = r#"[{"extractedData": {"llmData": {
            "vendor": {"value": {"vendorName": {"value": "Acme"}}},
            "invoice": {"value": {"invoiceId": {"value": "A-1"}}},
            "summary": {"value": {"invoiceTotal": {"value": 120.5}}}
        }}}]"#;

        // when
        let records = parse_documents(raw).unwrap();

        // then
        assert_eq!(
            records,
            vec![NewInvoice {
                vendor_name: "Acme".to_string(),
                invoice_no: "A-1".to_string(),
                total: BigDecimal::from_str("120.5").unwrap(),
            }]
        );
    }

    #[test]
    fn should_fill_defaults_for_missing_fields() {
        // given
        let raw = r#"[{}, {"extractedData": {"llmData": {
            "vendor": {"value": {"vendorName": {"value": "  "}}},
            "summary": {"value": {"invoiceTotal": {"value": "75.25"}}}
        }}}]"#;

        // when
        let records = parse_documents(raw).unwrap();

        // then
        assert_eq!(records[0].vendor_name, UNKNOWN_VENDOR);
        assert_eq!(records[0].invoice_no, "INV-000001");
        assert_eq!(records[0].total, BigDecimal::zero());
        assert_eq!(records[1].vendor_name, UNKNOWN_VENDOR);
        assert_eq!(records[1].invoice_no, "INV-000002");
        assert_eq!(records[1].total, BigDecimal::from_str("75.25").unwrap());
    }

    #[test]
    fn should_reject_non_array_source() {
        let result = parse_documents(r#"{"not": "an array"}"#);
        assert!(matches!(result, Err(IngestError::Malformed(_))));
    }

    #[test]
    fn should_reject_non_numeric_total() {
        // given
        let raw = r#"[{"extractedData": {"llmData": {
            "summary": {"value": {"invoiceTotal": {"value": "twelve"}}}
        }}}]"#;

        // when
        let result = parse_documents(raw);

        // then
        match result {
            Err(IngestError::Malformed(msg)) => assert!(msg.contains("document 1")),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn should_report_missing_source_file() {
        let result = load_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(IngestError::SourceMissing(_))));
    }
}
