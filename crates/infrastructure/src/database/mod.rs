use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use zonestore_dns_domain::config::{StorageConfig, SyncMode};

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Open the zone database described by `config` and bring its schema up to date.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn create_pool(config: &StorageConfig) -> Result<SqlitePool, sqlx::Error> {
    let database_url = config.database_url();
    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .synchronous(synchronous(config.synchronous))
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let mut pool_options = SqlitePoolOptions::new();
    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await?;
    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

fn synchronous(mode: SyncMode) -> SqliteSynchronous {
    match mode {
        SyncMode::Off => SqliteSynchronous::Off,
        SyncMode::Normal => SqliteSynchronous::Normal,
        SyncMode::Full => SqliteSynchronous::Full,
        SyncMode::Extra => SqliteSynchronous::Extra,
    }
}
