use sqlx::SqlitePool;
use tracing::{error, info};
use zonestore_dns_domain::config::StorageConfig;
use zonestore_dns_infrastructure::database::create_pool;

pub async fn init_database(cfg: &StorageConfig) -> anyhow::Result<SqlitePool> {
    info!(
        path = %cfg.path,
        synchronous = %cfg.synchronous,
        "Initializing database"
    );

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize database pool: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Database initialized successfully (max_connections={})",
        cfg.max_connections
    );

    Ok(pool)
}
