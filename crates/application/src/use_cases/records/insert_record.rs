use crate::ports::ZoneStore;
use std::sync::Arc;
use tracing::info;
use zonestore_dns_domain::zone::{
    host_key, is_in_zone, normalize_zone, relative_host, validate_name, APEX_HOST,
};
use zonestore_dns_domain::{DomainError, RecordPayload, RecordType, ZoneRecord};

pub struct InsertRecordUseCase {
    store: Arc<dyn ZoneStore>,
}

impl InsertRecordUseCase {
    pub fn new(store: Arc<dyn ZoneStore>) -> Self {
        Self { store }
    }

    /// Validate and store one record.
    ///
    /// `name` is either relative to the zone (`www`, `www.`, `@`) or a fully
    /// qualified name inside it. Returns the assigned identifier and the row
    /// as stored.
    pub async fn execute(
        &self,
        zone: &str,
        name: &str,
        record_type: RecordType,
        rdata: &str,
    ) -> Result<(i64, ZoneRecord), DomainError> {
        let zone = normalize_zone(zone);
        validate_name(&zone)?;

        let zones = self.store.list_zones().await?;
        if !zones.iter().any(|z| normalize_zone(z) == zone) {
            return Err(DomainError::ZoneNotFound(zone));
        }

        let host = Self::host_for(name, &zone);
        if host != APEX_HOST {
            validate_name(&host)?;
        }

        let payload = RecordPayload::parse(record_type, rdata)?;
        let record = ZoneRecord::from_payload(host, &payload);

        let id = self.store.insert_record(&zone, &record).await?;
        info!(zone = %zone, host = %record.name, record_type = %record_type, id, "Record inserted");

        Ok((id, record))
    }

    fn host_for(name: &str, zone: &str) -> String {
        let name = name.trim();
        if name.ends_with('.') && is_in_zone(name, zone) {
            host_key(&relative_host(name, zone))
        } else {
            host_key(name)
        }
    }
}
