use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use zonestore_dns_application::ports::ZoneStore;
use zonestore_dns_domain::dns_record::SoaPayload;
use zonestore_dns_domain::{DomainError, RecordPayload, RecordType, ZoneRecord};

/// Zone store double with failure and latency injection.
///
/// Unlike the real stores, a zone can exist here without an SOA row.
#[derive(Default)]
pub struct MockZoneStore {
    zones: Mutex<BTreeSet<String>>,
    soa: Mutex<HashMap<String, ZoneRecord>>,
    rows: Mutex<Vec<(String, ZoneRecord)>>,
    next_id: AtomicI64,
    fail_list: AtomicBool,
    fail_get: AtomicBool,
    get_error: Mutex<Option<DomainError>>,
    fail_insert: AtomicBool,
    delay: Mutex<Option<Duration>>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MockZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, zone: &str) -> Self {
        self.add_zone(zone);
        self
    }

    pub fn with_zone_without_soa(self, zone: &str) -> Self {
        self.zones.lock().unwrap().insert(zone.to_string());
        self
    }

    pub fn add_zone(&self, zone: &str) {
        self.zones.lock().unwrap().insert(zone.to_string());
        self.soa.lock().unwrap().insert(
            zone.to_string(),
            ZoneRecord::from_payload("@", &RecordPayload::SOA(SoaPayload::zone_default())),
        );
    }

    pub fn remove_zone(&self, zone: &str) {
        self.zones.lock().unwrap().remove(zone);
        self.soa.lock().unwrap().remove(zone);
    }

    /// Store a raw row without validating its payload.
    pub fn add_row(&self, zone: &str, host: &str, record_type: RecordType, rdata: &str) {
        self.rows
            .lock()
            .unwrap()
            .push((zone.to_string(), ZoneRecord::new(host, record_type, rdata)));
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    /// Make `get_records` return `error` instead of rows.
    pub fn set_get_error(&self, error: Option<DomainError>) {
        *self.get_error.lock().unwrap() = error;
    }

    pub fn set_fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    async fn maybe_delay(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn unavailable() -> DomainError {
    DomainError::BackendUnavailable("mock store offline".to_string())
}

#[async_trait]
impl ZoneStore for MockZoneStore {
    async fn list_zones(&self) -> Result<Vec<String>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.zones.lock().unwrap().iter().cloned().collect())
    }

    async fn create_zone(&self, zone: &str) -> Result<(), DomainError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.add_zone(zone);
        Ok(())
    }

    async fn get_records(
        &self,
        zone: &str,
        host: &str,
        record_type: RecordType,
        class: u16,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        if let Some(error) = self.get_error.lock().unwrap().clone() {
            return Err(error);
        }

        if record_type == RecordType::SOA {
            return Ok(self.soa.lock().unwrap().get(zone).cloned().into_iter().collect());
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|(z, r)| {
                z == zone && &*r.name == host && r.record_type == record_type && r.class == class
            })
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn insert_record(&self, zone: &str, record: &ZoneRecord) -> Result<i64, DomainError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        if record.record_type == RecordType::SOA {
            self.soa
                .lock()
                .unwrap()
                .insert(zone.to_string(), record.clone());
            self.zones.lock().unwrap().insert(zone.to_string());
            return Ok(0);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.rows
            .lock()
            .unwrap()
            .push((zone.to_string(), record.clone()));
        Ok(id)
    }
}
