use super::Repositories;
use std::sync::Arc;
use zonestore_dns_application::services::ZoneCache;
use zonestore_dns_application::use_cases::HandleZoneQueryUseCase;
use zonestore_dns_domain::Config;

pub struct DnsServices {
    pub zone_cache: Arc<ZoneCache>,
    pub handler_use_case: Arc<HandleZoneQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config, repos: &Repositories) -> Self {
        let zone_cache = Arc::new(
            ZoneCache::new(repos.zone_store.clone())
                .with_staleness(config.dns.zone_refresh_interval()),
        );

        let handler_use_case = Arc::new(
            HandleZoneQueryUseCase::new(zone_cache.clone(), repos.zone_store.clone(), config.dns.ttl)
                .with_query_timeout(config.dns.query_timeout()),
        );

        Self {
            zone_cache,
            handler_use_case,
        }
    }
}
