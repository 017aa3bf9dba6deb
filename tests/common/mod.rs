#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;
use spend_analytics::api::{self, AppState};
use spend_analytics::models::{InvoiceTotals, OracleReply, VendorSpend};
use spend_analytics::{AggregationService, AppError, AppResult, QueryBridge, RecordStore, SqlOracle};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// 内存中的发票数据, 聚合语义与 SQL 查询一致
#[derive(Default)]
pub struct MemoryStore {
    invoices: Vec<(String, BigDecimal)>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn with_invoices(invoices: &[(&str, i64)]) -> Self {
        Self {
            invoices: invoices
                .iter()
                .map(|(vendor, total)| (vendor.to_string(), BigDecimal::from(*total)))
                .collect(),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn invoice_totals(&self) -> Result<InvoiceTotals, sqlx::Error> {
        self.check_failure()?;
        let count = self.invoices.len() as i64;
        if count == 0 {
            return Ok(InvoiceTotals {
                total_spend: None,
                invoice_count: 0,
                avg_value: None,
            });
        }
        let sum = self
            .invoices
            .iter()
            .fold(BigDecimal::zero(), |acc, (_, total)| acc + total);
        let avg = sum.clone() / BigDecimal::from(count);
        Ok(InvoiceTotals {
            total_spend: Some(sum),
            invoice_count: count,
            avg_value: Some(avg),
        })
    }

    async fn vendor_spend(&self, limit: i64) -> Result<Vec<VendorSpend>, sqlx::Error> {
        self.check_failure()?;
        let mut by_vendor: BTreeMap<&str, BigDecimal> = BTreeMap::new();
        for (vendor, total) in &self.invoices {
            *by_vendor.entry(vendor.as_str()).or_insert_with(BigDecimal::zero) += total;
        }
        let mut ranking: Vec<VendorSpend> = by_vendor
            .into_iter()
            .map(|(name, spend)| VendorSpend {
                name: name.to_string(),
                spend,
            })
            .collect();
        ranking.sort_by(|a, b| b.spend.cmp(&a.spend).then_with(|| a.name.cmp(&b.name)));
        ranking.truncate(limit as usize);
        Ok(ranking)
    }
}

/// 按预设结果应答的 SQL 生成服务, 统计调用次数
pub struct ScriptedOracle {
    reply: fn() -> AppResult<OracleReply>,
    pub calls: AtomicUsize,
}

impl ScriptedOracle {
    pub fn new(reply: fn() -> AppResult<OracleReply>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlOracle for ScriptedOracle {
    async fn generate_sql(&self, _prompt: &str) -> AppResult<OracleReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }
}

pub fn failing_oracle_reply() -> AppResult<OracleReply> {
    Err(AppError::OracleError("500 Internal Server Error".to_string()))
}

pub fn state(store: Arc<MemoryStore>, oracle: Option<Arc<ScriptedOracle>>) -> AppState {
    AppState {
        aggregation: Arc::new(AggregationService::new(store)),
        bridge: Arc::new(QueryBridge::new(
            oracle.map(|oracle| oracle as Arc<dyn SqlOracle>),
        )),
    }
}

pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = api::router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
