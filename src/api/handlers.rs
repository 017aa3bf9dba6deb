use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::error::AppError;
use crate::models::{ChatAnswer, ChatRequest, OverviewStats, VendorSpend};
use crate::service::aggregation::TOP_VENDORS;
use crate::service::{AggregationService, QueryBridge};

/// 共享状态: 聚合服务与问答桥接
#[derive(Clone)]
pub struct AppState {
    pub aggregation: Arc<AggregationService>,
    pub bridge: Arc<QueryBridge>,
}

/// 排名长度参数
#[derive(Debug, Deserialize)]
pub struct TopVendorsParams {
    pub limit: Option<usize>,
}

/// 根路径
pub async fn index() -> &'static str {
    "spend analytics gateway is running"
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /stats
pub async fn overview_stats(
    State(state): State<AppState>,
) -> Result<Json<OverviewStats>, ApiError> {
    let stats = state
        .aggregation
        .overview_stats()
        .await
        .map_err(|e| ApiError::new("overview_stats", e))?;
    Ok(Json(stats))
}

/// GET /vendors/top10
pub async fn top_vendors_by_spend(
    State(state): State<AppState>,
) -> Result<Json<Vec<VendorSpend>>, ApiError> {
    let ranking = state
        .aggregation
        .top_vendors_by_spend()
        .await
        .map_err(|e| ApiError::new("top_vendors_by_spend", e))?;
    Ok(Json(ranking))
}

/// GET /vendors/top?limit=N
pub async fn top_vendors(
    State(state): State<AppState>,
    params: Result<Query<TopVendorsParams>, QueryRejection>,
) -> Result<Json<Vec<VendorSpend>>, ApiError> {
    const OPERATION: &str = "top_vendors";

    let Query(params) = params
        .map_err(|e| ApiError::new(OPERATION, AppError::InvalidRequest(e.body_text())))?;
    let limit = params.limit.unwrap_or(TOP_VENDORS);
    let ranking = state
        .aggregation
        .top_vendors(limit)
        .await
        .map_err(|e| ApiError::new(OPERATION, e))?;
    Ok(Json(ranking))
}

/// POST /chat-with-data
pub async fn chat_with_data(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatAnswer>, ApiError> {
    const OPERATION: &str = "chat_with_data";

    let Json(req) = body
        .map_err(|e| ApiError::new(OPERATION, AppError::InvalidRequest(e.body_text())))?;
    let answer = state
        .bridge
        .ask_data_question(&req.prompt)
        .await
        .map_err(|e| ApiError::new(OPERATION, e))?;
    Ok(Json(answer))
}
