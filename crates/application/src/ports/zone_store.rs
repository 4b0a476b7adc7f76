use async_trait::async_trait;
use zonestore_dns_domain::{DomainError, RecordType, ZoneRecord};

/// Storage capability consumed by the query engine and the admin use cases.
///
/// Implementations map every storage or network failure to
/// [`DomainError::BackendUnavailable`] and never apply a write partially.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Names of every zone with an SOA. Empty when there are none.
    async fn list_zones(&self) -> Result<Vec<String>, DomainError>;

    /// Write the default SOA for `zone`. Creating an existing zone succeeds.
    async fn create_zone(&self, zone: &str) -> Result<(), DomainError>;

    /// Raw rows stored under `(zone, host, record_type, class)`.
    ///
    /// `host` is the storage host key (`record.` or `@`). SOA rows are keyed
    /// by zone alone.
    async fn get_records(
        &self,
        zone: &str,
        host: &str,
        record_type: RecordType,
        class: u16,
    ) -> Result<Vec<ZoneRecord>, DomainError>;

    /// Store `record` in `zone` and return the identifier assigned to the row.
    async fn insert_record(&self, zone: &str, record: &ZoneRecord) -> Result<i64, DomainError>;
}
