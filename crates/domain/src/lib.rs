//! zonestore-dns domain layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod serial;
pub mod ttl;
pub mod zone;

pub use config::{CliOverrides, Config, DnsConfig};
pub use dns_record::{RecordPayload, RecordType, ZoneRecord, CLASS_INET};
pub use errors::DomainError;
pub use serial::{soa_serial, soa_serial_at};
pub use ttl::{resolve_ttl, DEFAULT_TTL};
