use super::record_decoder::{decode_rows, glue_target, synthesized_soa};
use crate::ports::ZoneStore;
use hickory_proto::rr::{Name, Record};
use std::sync::Arc;
use tracing::{debug, warn};
use zonestore_dns_domain::zone::{host_key, is_in_zone, relative_host};
use zonestore_dns_domain::{soa_serial, DomainError, RecordType};

const GLUE_TYPES: [RecordType; 3] = [RecordType::A, RecordType::AAAA, RecordType::CNAME];

#[derive(Debug, Clone, Default)]
pub struct ResolvedRecords {
    pub answers: Vec<Record>,
    pub additionals: Vec<Record>,
}

/// Per-type lookups against the zone store.
pub struct ZoneResolver {
    store: Arc<dyn ZoneStore>,
    ttl_floor: u32,
}

impl ZoneResolver {
    pub fn new(store: Arc<dyn ZoneStore>, ttl_floor: u32) -> Self {
        Self { store, ttl_floor }
    }

    /// Answer `qname` of `record_type` inside the already matched `zone`.
    ///
    /// MX and SRV answers carry the A, AAAA and CNAME rows of their in-zone
    /// targets as additionals. Only the lookup of the answers themselves can
    /// fail the call.
    pub async fn resolve(
        &self,
        zone: &str,
        qname: &Name,
        record_type: RecordType,
        class: u16,
    ) -> Result<ResolvedRecords, DomainError> {
        let host = host_key(&relative_host(&qname.to_ascii(), zone));
        let serial = soa_serial();

        let rows = self
            .store
            .get_records(zone, &host, record_type, class)
            .await?;
        let mut answers = decode_rows(qname, &rows, self.ttl_floor, serial);

        if record_type == RecordType::SOA && answers.is_empty() {
            debug!(zone = %zone, "No stored SOA, synthesizing");
            answers.extend(synthesized_soa(qname, self.ttl_floor, serial));
        }

        let additionals = if record_type.has_target() {
            self.glue(zone, class, &answers, serial).await
        } else {
            Vec::new()
        };

        debug!(
            zone = %zone,
            host = %host,
            record_type = %record_type,
            answers = answers.len(),
            additionals = additionals.len(),
            "Zone lookup complete"
        );

        Ok(ResolvedRecords {
            answers,
            additionals,
        })
    }

    async fn glue(&self, zone: &str, class: u16, answers: &[Record], serial: u32) -> Vec<Record> {
        let mut visited: Vec<&Name> = Vec::new();
        let mut additionals = Vec::new();

        for target in answers.iter().filter_map(glue_target) {
            if visited.contains(&target) {
                continue;
            }
            visited.push(target);

            let target_name = target.to_ascii();
            if !is_in_zone(&target_name, zone) {
                continue;
            }
            let host = host_key(&relative_host(&target_name, zone));

            for glue_type in GLUE_TYPES {
                match self.store.get_records(zone, &host, glue_type, class).await {
                    Ok(rows) => {
                        additionals.extend(decode_rows(target, &rows, self.ttl_floor, serial))
                    }
                    Err(e) => {
                        warn!(zone = %zone, target = %target, error = %e, "Glue lookup failed");
                    }
                }
            }
        }

        additionals
    }
}
