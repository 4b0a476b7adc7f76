use super::{DnsServices, Repositories};
use std::sync::Arc;
use zonestore_dns_application::use_cases::{
    CreateZoneUseCase, InsertRecordUseCase, ListZonesUseCase,
};

pub struct UseCases {
    pub create_zone: Arc<CreateZoneUseCase>,
    pub list_zones: Arc<ListZonesUseCase>,
    pub insert_record: Arc<InsertRecordUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, dns: &DnsServices) -> Self {
        Self {
            create_zone: Arc::new(
                CreateZoneUseCase::new(repos.zone_store.clone())
                    .with_zone_cache(dns.zone_cache.clone()),
            ),
            list_zones: Arc::new(ListZonesUseCase::new(repos.zone_store.clone())),
            insert_record: Arc::new(InsertRecordUseCase::new(repos.zone_store.clone())),
        }
    }
}
