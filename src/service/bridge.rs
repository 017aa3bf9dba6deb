use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::ChatAnswer;
use crate::service::oracle::SqlOracle;

/// 问答桥接: 把自然语言问题转发给 SQL 生成服务并校验返回结构
///
/// 不缓存, 不重试, 也不执行生成的 SQL; 调用之间不保留状态。
pub struct QueryBridge {
    oracle: Option<Arc<dyn SqlOracle>>,
}

impl QueryBridge {
    pub fn new(oracle: Option<Arc<dyn SqlOracle>>) -> Self {
        Self { oracle }
    }

    pub fn is_configured(&self) -> bool {
        self.oracle.is_some()
    }

    pub async fn ask_data_question(&self, prompt: &str) -> AppResult<ChatAnswer> {
        // 先做本地校验, 失败时不访问外部服务
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AppError::InvalidPrompt);
        }
        let oracle = self.oracle.as_ref().ok_or(AppError::BridgeUnconfigured)?;

        let reply = oracle.generate_sql(prompt).await?;
        let answer = ChatAnswer::from(reply);
        tracing::info!("oracle answered with {} rows", answer.rows.len());
        Ok(answer)
    }
}
