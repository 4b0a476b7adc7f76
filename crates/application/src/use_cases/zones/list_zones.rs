use crate::ports::ZoneStore;
use std::sync::Arc;
use zonestore_dns_domain::zone::normalize_zone;
use zonestore_dns_domain::DomainError;

pub struct ListZonesUseCase {
    store: Arc<dyn ZoneStore>,
}

impl ListZonesUseCase {
    pub fn new(store: Arc<dyn ZoneStore>) -> Self {
        Self { store }
    }

    /// Normalized zone names, sorted.
    pub async fn execute(&self) -> Result<Vec<String>, DomainError> {
        let mut zones: Vec<String> = self
            .store
            .list_zones()
            .await?
            .iter()
            .map(|zone| normalize_zone(zone))
            .collect();
        zones.sort();
        zones.dedup();
        Ok(zones)
    }
}
