use spend_analytics::{
    api::{self, AppState},
    create_pool, AggregationService, AppConfig, HttpOracle, PgStore, QueryBridge, SqlOracle,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式, 级别由 RUST_LOG 控制
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created");

    let store = Arc::new(PgStore::new(pool.clone()));
    let aggregation = Arc::new(AggregationService::new(store));

    let oracle = HttpOracle::from_config(&config.oracle)?;
    match &oracle {
        Some(oracle) => info!("SQL oracle endpoint: {}", oracle.endpoint()),
        None => warn!("ORACLE_BASE_URL not set, /chat-with-data will answer with an error"),
    }
    let bridge = Arc::new(QueryBridge::new(
        oracle.map(|oracle| Arc::new(oracle) as Arc<dyn SqlOracle>),
    ));

    let app = api::router(AppState { aggregation, bridge });

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /stats            - overview statistics");
    info!("  GET  /vendors/top10    - top 10 vendors by spend");
    info!("  GET  /vendors/top      - top N vendors by spend (?limit=N)");
    info!("  POST /chat-with-data   - natural language question -> SQL");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 退出前释放连接池
    pool.close().await;
    info!("Server stopped, database pool closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
