use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{error, instrument, warn};
use zonestore_dns_application::ports::ZoneStore;
use zonestore_dns_domain::dns_record::SoaPayload;
use zonestore_dns_domain::zone::APEX_HOST;
use zonestore_dns_domain::{DomainError, RecordPayload, RecordType, ZoneRecord};

type SoaRow = (String, String, i64, i64, i64, i64, i64);

/// Zone store on the `soa` and `rr` tables.
pub struct SqliteZoneStore {
    pool: SqlitePool,
}

impl SqliteZoneStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_soa(row: SoaRow) -> Result<SoaPayload, DomainError> {
        let (ns, mbox, refresh, retry, expire, minttl, ttl) = row;
        Ok(SoaPayload {
            ns,
            mbox,
            refresh: soa_column("refresh", refresh)?,
            retry: soa_column("retry", retry)?,
            expire: soa_column("expire", expire)?,
            minttl: soa_column("minttl", minttl)?,
            ttl: soa_column("ttl", ttl)?,
        })
    }

    async fn upsert_soa(&self, zone: &str, soa: &SoaPayload) -> Result<i64, DomainError> {
        let row = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO soa (zone, ns, mbox, serial, refresh, retry, expire, minttl, ttl)
             VALUES (?, ?, ?, 1, ?, ?, ?, ?, ?)
             ON CONFLICT(zone) DO UPDATE SET
                ns = excluded.ns, mbox = excluded.mbox, refresh = excluded.refresh,
                retry = excluded.retry, expire = excluded.expire, minttl = excluded.minttl,
                ttl = excluded.ttl
             RETURNING rowid",
        )
        .bind(zone)
        .bind(&soa.ns)
        .bind(&soa.mbox)
        .bind(soa.refresh as i64)
        .bind(soa.retry as i64)
        .bind(soa.expire as i64)
        .bind(soa.minttl as i64)
        .bind(soa.ttl as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, zone = %zone, "Failed to store SOA");
            DomainError::BackendUnavailable(e.to_string())
        })?;

        Ok(row.0)
    }
}

#[async_trait]
impl ZoneStore for SqliteZoneStore {
    #[instrument(skip(self))]
    async fn list_zones(&self) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT zone FROM soa ORDER BY zone ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list zones");
                DomainError::BackendUnavailable(e.to_string())
            })?;

        Ok(rows.into_iter().map(|(zone,)| zone).collect())
    }

    #[instrument(skip(self))]
    async fn create_zone(&self, zone: &str) -> Result<(), DomainError> {
        let soa = SoaPayload::zone_default();

        sqlx::query(
            "INSERT INTO soa (zone, ns, mbox, serial, refresh, retry, expire, minttl)
             VALUES (?, ?, ?, 1, ?, ?, ?, ?)
             ON CONFLICT(zone) DO NOTHING",
        )
        .bind(zone)
        .bind(&soa.ns)
        .bind(&soa.mbox)
        .bind(soa.refresh as i64)
        .bind(soa.retry as i64)
        .bind(soa.expire as i64)
        .bind(soa.minttl as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, zone = %zone, "Failed to create zone");
            DomainError::BackendUnavailable(e.to_string())
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_records(
        &self,
        zone: &str,
        host: &str,
        record_type: RecordType,
        class: u16,
    ) -> Result<Vec<ZoneRecord>, DomainError> {
        if record_type == RecordType::SOA {
            let row = sqlx::query_as::<_, SoaRow>(
                "SELECT ns, mbox, refresh, retry, expire, minttl, ttl FROM soa WHERE zone = ?",
            )
            .bind(zone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, zone = %zone, "Failed to query SOA");
                DomainError::BackendUnavailable(e.to_string())
            })?;

            let Some(row) = row else {
                return Ok(Vec::new());
            };
            return match Self::row_to_soa(row) {
                Ok(soa) => Ok(vec![ZoneRecord::from_payload(
                    APEX_HOST,
                    &RecordPayload::SOA(soa),
                )]),
                Err(e) => {
                    warn!(error = %e, zone = %zone, "Skipping malformed SOA row");
                    Ok(Vec::new())
                }
            };
        }

        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT name, rdata FROM rr
             WHERE zone = ? AND name = ? AND rrtype = ? AND class = ?
             ORDER BY id ASC",
        )
        .bind(zone)
        .bind(host)
        .bind(record_type.to_u16() as i64)
        .bind(class as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, zone = %zone, host = %host, "Failed to query records");
            DomainError::BackendUnavailable(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(name, rdata)| ZoneRecord::new(name, record_type, rdata).with_class(class))
            .collect())
    }

    #[instrument(skip(self, record), fields(host = %record.name, record_type = %record.record_type))]
    async fn insert_record(&self, zone: &str, record: &ZoneRecord) -> Result<i64, DomainError> {
        if record.record_type == RecordType::SOA {
            return match record.payload()? {
                RecordPayload::SOA(soa) => self.upsert_soa(zone, &soa).await,
                _ => Err(DomainError::invalid_record("SOA", "payload is not an SOA")),
            };
        }

        let row = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO rr (zone, name, rrtype, class, rdata)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(zone)
        .bind(record.name.as_ref())
        .bind(record.record_type.to_u16() as i64)
        .bind(record.class as i64)
        .bind(record.rdata.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, zone = %zone, "Failed to insert record");
            DomainError::BackendUnavailable(e.to_string())
        })?;

        Ok(row.0)
    }
}

fn soa_column(field: &str, value: i64) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::invalid_record("SOA", format!("{} out of range: {}", field, value)))
}
