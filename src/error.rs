use axum::http::StatusCode;
use thiserror::Error;

/// 聚合与问答桥接的统一错误类型
///
/// `Display` 面向运维日志, 可能包含内部细节;
/// 返回给客户端的文本见 [`AppError::public_message`]。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("prompt is required")]
    InvalidPrompt,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("limit must be between 1 and {max}, got {got}")]
    InvalidLimit { got: usize, max: usize },

    #[error("ORACLE_BASE_URL not configured")]
    BridgeUnconfigured,

    #[error("oracle error: {0}")]
    OracleError(String),

    #[error("oracle returned a malformed response: {0}")]
    OracleMalformedResponse(String),

    #[error("oracle unreachable: {0}")]
    OracleUnreachable(String),
}

impl AppError {
    /// 日志里使用的错误分类名
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::InvalidPrompt => "invalid_prompt",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::InvalidLimit { .. } => "invalid_limit",
            AppError::BridgeUnconfigured => "bridge_unconfigured",
            AppError::OracleError(_) => "oracle_error",
            AppError::OracleMalformedResponse(_) => "oracle_malformed_response",
            AppError::OracleUnreachable(_) => "oracle_unreachable",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPrompt
            | AppError::InvalidRequest(_)
            | AppError::InvalidLimit { .. } => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) | AppError::BridgeUnconfigured => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::OracleError(_) | AppError::OracleMalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::OracleUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// 客户端可见的错误信息, 不包含存储层或传输层细节
    pub fn public_message(&self) -> String {
        match self {
            AppError::StoreUnavailable(_) => "failed to read analytics data".to_string(),
            AppError::OracleMalformedResponse(_) => {
                "oracle returned an unexpected response".to_string()
            }
            AppError::OracleUnreachable(_) => "oracle is unavailable".to_string(),
            other => other.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_hide_store_details_from_clients() {
        // given
        let err = AppError::StoreUnavailable(sqlx::Error::Protocol("password=hunter2".to_string()));

        // when
        let message = err.public_message();

        // then
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("hunter2"));
        assert!(err.to_string().contains("hunter2"));
    }

    #[test]
    fn should_keep_oracle_status_text_for_diagnosis() {
        // given
        let err = AppError::OracleError("500 Internal Server Error".to_string());

        // then
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.public_message(), "oracle error: 500 Internal Server Error");
    }

    #[test]
    fn should_map_client_mistakes_to_bad_request() {
        assert_eq!(AppError::InvalidPrompt.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidPrompt.public_message(), "prompt is required");
        assert_eq!(
            AppError::InvalidLimit { got: 0, max: 100 }.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn should_name_the_missing_setting_when_unconfigured() {
        let err = AppError::BridgeUnconfigured;
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.public_message().contains("ORACLE_BASE_URL"));
    }
}
