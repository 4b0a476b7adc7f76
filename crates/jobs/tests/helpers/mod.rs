#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use zonestore_dns_application::ports::ZoneStore;
use zonestore_dns_domain::{DomainError, RecordType, ZoneRecord};

/// Zone store that only answers `list_zones`.
#[derive(Default)]
pub struct CountingZoneStore {
    zones: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
    fail: AtomicBool,
}

impl CountingZoneStore {
    pub fn with_zones(zones: &[&str]) -> Self {
        let store = Self::default();
        store.set_zones(zones);
        store
    }

    pub fn set_zones(&self, zones: &[&str]) {
        *self.zones.lock().unwrap() = zones.iter().map(|z| z.to_string()).collect();
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneStore for CountingZoneStore {
    async fn list_zones(&self) -> Result<Vec<String>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::BackendUnavailable("offline".to_string()));
        }
        Ok(self.zones.lock().unwrap().clone())
    }

    async fn create_zone(&self, _zone: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn get_records(
        &self,
        _zone: &str,
        _host: &str,
        _record_type: RecordType,
        _class: u16,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn insert_record(&self, _zone: &str, _record: &ZoneRecord) -> Result<i64, DomainError> {
        Ok(0)
    }
}
