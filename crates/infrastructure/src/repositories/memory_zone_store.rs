use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use zonestore_dns_application::ports::ZoneStore;
use zonestore_dns_domain::dns_record::SoaPayload;
use zonestore_dns_domain::zone::APEX_HOST;
use zonestore_dns_domain::{DomainError, RecordPayload, RecordType, ZoneRecord};

type RowKey = (String, String, RecordType, u16);

/// Process-local zone store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryZoneStore {
    soa: DashMap<String, SoaPayload>,
    rows: DashMap<RowKey, Vec<(i64, Arc<str>)>>,
    next_id: AtomicI64,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn list_zones(&self) -> Result<Vec<String>, DomainError> {
        let mut zones: Vec<String> = self.soa.iter().map(|entry| entry.key().clone()).collect();
        zones.sort();
        Ok(zones)
    }

    async fn create_zone(&self, zone: &str) -> Result<(), DomainError> {
        self.soa
            .entry(zone.to_string())
            .or_insert_with(SoaPayload::zone_default);
        Ok(())
    }

    async fn get_records(
        &self,
        zone: &str,
        host: &str,
        record_type: RecordType,
        class: u16,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        if record_type == RecordType::SOA {
            return Ok(self
                .soa
                .get(zone)
                .map(|soa| {
                    ZoneRecord::from_payload(APEX_HOST, &RecordPayload::SOA(soa.value().clone()))
                })
                .into_iter()
                .collect());
        }

        let key = (zone.to_string(), host.to_string(), record_type, class);
        Ok(self
            .rows
            .get(&key)
            .map(|rows| {
                rows.iter()
                    .map(|(_, rdata)| {
                        ZoneRecord::new(host, record_type, Arc::clone(rdata)).with_class(class)
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default())
    }

    async fn insert_record(&self, zone: &str, record: &ZoneRecord) -> Result<i64, DomainError> {
        if record.record_type == RecordType::SOA {
            return match record.payload()? {
                RecordPayload::SOA(soa) => {
                    self.soa.insert(zone.to_string(), soa);
                    Ok(self.next_id())
                }
                _ => Err(DomainError::invalid_record("SOA", "payload is not an SOA")),
            };
        }

        let id = self.next_id();
        let key = (
            zone.to_string(),
            record.name.to_string(),
            record.record_type,
            record.class,
        );
        self.rows
            .entry(key)
            .or_default()
            .push((id, Arc::clone(&record.rdata)));
        Ok(id)
    }
}
