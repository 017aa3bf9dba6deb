use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppError;

/// 错误响应体: `{ "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 网关边界上的错误, 记录发生错误的操作名
#[derive(Debug)]
pub struct ApiError {
    pub operation: &'static str,
    pub source: AppError,
}

impl ApiError {
    pub fn new(operation: &'static str, source: AppError) -> Self {
        Self { operation, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.source.status();
        if status.is_server_error() {
            tracing::error!(
                operation = self.operation,
                kind = self.source.kind(),
                "{}",
                self.source
            );
        } else {
            tracing::warn!(
                operation = self.operation,
                kind = self.source.kind(),
                "{}",
                self.source
            );
        }

        let body = ErrorBody {
            error: self.source.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// 未匹配的路由
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".to_string(),
        }),
    )
}
