use async_trait::async_trait;
use std::time::Duration;

use crate::config::OracleConfig;
use crate::error::{AppError, AppResult};
use crate::models::{OracleReply, OracleRequest};

/// SQL 生成服务 (自然语言 -> SQL)
#[async_trait]
pub trait SqlOracle: Send + Sync {
    /// 单次调用, 不重试
    async fn generate_sql(&self, prompt: &str) -> AppResult<OracleReply>;
}

/// 基于 HTTP 的 SQL 生成服务客户端
pub struct HttpOracle {
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpOracle {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            http_client,
        })
    }

    /// 未配置地址时返回 None
    pub fn from_config(config: &OracleConfig) -> Result<Option<Self>, reqwest::Error> {
        config
            .base_url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_secs(config.timeout_secs)))
            .transpose()
    }

    pub fn endpoint(&self) -> String {
        format!("{}/generate-sql", self.base_url)
    }
}

#[async_trait]
impl SqlOracle for HttpOracle {
    async fn generate_sql(&self, prompt: &str) -> AppResult<OracleReply> {
        let url = self.endpoint();
        tracing::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(&OracleRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::OracleUnreachable(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    AppError::OracleUnreachable(format!("cannot reach {}: {}", url, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::OracleError(status.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                AppError::OracleUnreachable(format!("failed to read response body: {}", e))
            })?;

        serde_json::from_slice::<OracleReply>(&body)
            .map_err(|e| AppError::OracleMalformedResponse(e.to_string()))
    }
}
