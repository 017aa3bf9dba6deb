use spend_analytics::{
    create_pool,
    db::ensure_schema,
    service::ingest::{self, IngestSummary},
    AppConfig,
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::from_env()?;
    let source = Path::new(&config.seed.file);

    // 先解析文件, 源文件有问题时不连接数据库
    let records = ingest::load_file(source)?;
    info!("Loaded {} documents from {}", records.len(), source.display());

    let pool = create_pool(&config.database).await?;
    ensure_schema(&pool).await?;

    let IngestSummary { vendors, invoices } = ingest::ingest(&pool, &records).await?;
    info!("Seed complete. Vendors: {}, Invoices: {}", vendors, invoices);

    pool.close().await;
    Ok(())
}
