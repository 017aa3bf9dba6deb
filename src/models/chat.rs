use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 生成 SQL 的执行结果行, 保留列顺序
pub type Row = IndexMap<String, Value>;

/// 问答请求体
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: String,
}

/// 发往 SQL 生成服务的请求体
#[derive(Debug, Serialize)]
pub struct OracleRequest<'a> {
    pub prompt: &'a str,
}

/// SQL 生成服务的返回体
///
/// `sql` 必须是字符串; `rows` 可缺省或为 null, 存在时必须是对象数组。
#[derive(Debug, Clone, Deserialize)]
pub struct OracleReply {
    pub sql: String,
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
}

/// 返回给客户端的问答结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub sql: String,
    pub rows: Vec<Row>,
}

impl From<OracleReply> for ChatAnswer {
    fn from(reply: OracleReply) -> Self {
        Self {
            sql: reply.sql,
            rows: reply.rows.unwrap_or_default(),
        }
    }
}
