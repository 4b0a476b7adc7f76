use crate::ports::ZoneStore;
use crate::services::{RecordTypeMapper, ZoneCache, ZoneResolver};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{DNSClass, Name, Record, RecordType as HickoryRecordType};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, warn};
use zonestore_dns_domain::DomainError;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct ZoneQuery {
    pub name: Name,
    pub query_type: HickoryRecordType,
    pub query_class: DNSClass,
}

impl ZoneQuery {
    pub fn new(name: Name, query_type: HickoryRecordType) -> Self {
        Self {
            name,
            query_type,
            query_class: DNSClass::IN,
        }
    }
}

/// Reply content for a query inside one of our zones.
#[derive(Debug, Clone)]
pub struct ZoneAnswer {
    pub zone: Arc<str>,
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl ZoneAnswer {
    fn empty(zone: Arc<str>, response_code: ResponseCode) -> Self {
        Self {
            zone,
            response_code,
            answers: Vec::new(),
            additionals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ZoneQueryOutcome {
    /// No zone contains the name; the query belongs to the next handler.
    NotAuthoritative,
    Answered(ZoneAnswer),
}

pub struct HandleZoneQueryUseCase {
    zone_cache: Arc<ZoneCache>,
    resolver: ZoneResolver,
    query_timeout: Duration,
}

impl HandleZoneQueryUseCase {
    pub fn new(zone_cache: Arc<ZoneCache>, store: Arc<dyn ZoneStore>, ttl_floor: u32) -> Self {
        Self {
            zone_cache,
            resolver: ZoneResolver::new(store, ttl_floor),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Route one query. Once a zone matches, the outcome always carries a
    /// reply. Storage failures and the deadline turn into SERVFAIL; any other
    /// lookup error gives an empty NOERROR answer.
    pub async fn execute(&self, query: &ZoneQuery) -> ZoneQueryOutcome {
        let deadline = Instant::now() + self.query_timeout;
        let qname = query.name.to_ascii();

        let snapshot = match timeout_at(deadline, self.zone_cache.zones()).await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                warn!(domain = %qname, "Zone list refresh timed out, using cached zones");
                self.zone_cache.snapshot()
            }
        };

        let Some(zone) = snapshot.find(&qname) else {
            debug!(domain = %qname, "No matching zone");
            return ZoneQueryOutcome::NotAuthoritative;
        };

        let record_type = match query.query_type {
            HickoryRecordType::AXFR | HickoryRecordType::IXFR => {
                debug!(domain = %qname, zone = %zone, "Zone transfer not implemented");
                None
            }
            other => RecordTypeMapper::from_hickory(other),
        };
        let Some(record_type) = record_type else {
            debug!(domain = %qname, record_type = ?query.query_type, "Unsupported query type");
            return ZoneQueryOutcome::Answered(ZoneAnswer::empty(zone, ResponseCode::NotImp));
        };

        let lookup = self.resolver.resolve(
            &zone,
            &query.name,
            record_type,
            u16::from(query.query_class),
        );

        let result = match timeout_at(deadline, lookup).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::QueryTimeout),
        };

        match result {
            Ok(resolved) => ZoneQueryOutcome::Answered(ZoneAnswer {
                zone,
                response_code: ResponseCode::NoError,
                answers: resolved.answers,
                additionals: resolved.additionals,
            }),
            Err(e) if e.is_server_failure() => {
                error!(domain = %qname, zone = %zone, record_type = %record_type, error = %e, "Zone lookup failed");
                ZoneQueryOutcome::Answered(ZoneAnswer::empty(zone, ResponseCode::ServFail))
            }
            Err(e) => {
                warn!(domain = %qname, zone = %zone, record_type = %record_type, error = %e, "Zone lookup failed, answering empty");
                ZoneQueryOutcome::Answered(ZoneAnswer::empty(zone, ResponseCode::NoError))
            }
        }
    }
}
