use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub oracle: OracleConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// SQL 生成服务配置, base_url 为空表示未配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub file: String,
}

/// 环境变量的扁平视图 (config 的 Environment 源会把键转成小写)
#[derive(Debug, Deserialize)]
struct EnvSettings {
    server_host: String,
    server_port: u16,
    database_url: String,
    database_max_connections: u32,
    #[serde(default)]
    oracle_base_url: Option<String>,
    oracle_timeout_secs: u64,
    seed_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/spend_analytics".to_string(),
                max_connections: 20,
            },
            oracle: OracleConfig {
                base_url: None,
                timeout_secs: 30,
            },
            seed: SeedConfig {
                file: "data/invoices.json".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_builder(config::Config::builder().add_source(Environment::default()))
    }

    /// 在默认值之上叠加给定的配置源
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings: EnvSettings = builder
            .set_default("server_host", defaults.server.host)?
            .set_default("server_port", i64::from(defaults.server.port))?
            .set_default("database_url", defaults.database.url)?
            .set_default(
                "database_max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default("oracle_timeout_secs", defaults.oracle.timeout_secs as i64)?
            .set_default("seed_file", defaults.seed.file)?
            .build()?
            .try_deserialize()?;

        Ok(Self {
            server: ServerConfig {
                host: settings.server_host,
                port: settings.server_port,
            },
            database: DatabaseConfig {
                url: settings.database_url,
                max_connections: settings.database_max_connections,
            },
            oracle: OracleConfig {
                base_url: normalize_base_url(settings.oracle_base_url),
                timeout_secs: settings.oracle_timeout_secs,
            },
            seed: SeedConfig {
                file: settings.seed_file,
            },
        })
    }
}

/// 空白地址视为未配置, 去掉末尾的 '/'
fn normalize_base_url(raw: Option<String>) -> Option<String> {
    raw.map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
}
