use crate::ports::ZoneStore;
use crate::services::ZoneCache;
use std::sync::Arc;
use tracing::{info, warn};
use zonestore_dns_domain::zone::{normalize_zone, validate_name};
use zonestore_dns_domain::DomainError;

pub struct CreateZoneUseCase {
    store: Arc<dyn ZoneStore>,
    zone_cache: Option<Arc<ZoneCache>>,
}

impl CreateZoneUseCase {
    pub fn new(store: Arc<dyn ZoneStore>) -> Self {
        Self {
            store,
            zone_cache: None,
        }
    }

    /// Refresh `zone_cache` after each creation so the zone answers at once.
    pub fn with_zone_cache(mut self, zone_cache: Arc<ZoneCache>) -> Self {
        self.zone_cache = Some(zone_cache);
        self
    }

    pub async fn execute(&self, name: &str) -> Result<String, DomainError> {
        let zone = normalize_zone(name);
        validate_name(&zone)?;

        self.store.create_zone(&zone).await?;
        info!(zone = %zone, "Zone created");

        if let Some(cache) = &self.zone_cache {
            if let Err(e) = cache.refresh().await {
                warn!(zone = %zone, error = %e, "Zone created but zone list refresh failed");
            }
        }

        Ok(zone)
    }
}
