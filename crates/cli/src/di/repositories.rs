use crate::bootstrap::init_database;
use std::sync::Arc;
use tracing::info;
use zonestore_dns_application::ports::ZoneStore;
use zonestore_dns_domain::config::{StorageBackend, StorageConfig};
use zonestore_dns_infrastructure::repositories::{MemoryZoneStore, SqliteZoneStore};

pub struct Repositories {
    pub zone_store: Arc<dyn ZoneStore>,
}

impl Repositories {
    pub async fn new(storage: &StorageConfig) -> anyhow::Result<Self> {
        let zone_store: Arc<dyn ZoneStore> = match storage.backend {
            StorageBackend::Sqlite => Arc::new(SqliteZoneStore::new(init_database(storage).await?)),
            StorageBackend::Memory => {
                info!("Using in-memory zone store; records are lost on exit");
                Arc::new(MemoryZoneStore::new())
            }
        };
        Ok(Self { zone_store })
    }
}
