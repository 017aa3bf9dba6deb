use axum::{
    routing::{get, post},
    Router,
};
use crate::api::error::not_found;
use crate::api::handlers::{self, AppState};

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::overview_stats))
        .route("/vendors/top10", get(handlers::top_vendors_by_spend))
        .route("/vendors/top", get(handlers::top_vendors))
        .route("/chat-with-data", post(handlers::chat_with_data))
        .fallback(not_found)
        .with_state(state)
}
