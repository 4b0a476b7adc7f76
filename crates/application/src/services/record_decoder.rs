//! Stored rows to protocol records.
//!
//! Every decoded record is owned by the query name with class IN. A row whose
//! payload does not parse, or names a host that is not a valid domain name,
//! is logged and dropped; it never fails the surrounding answer.

use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};
use tracing::warn;
use zonestore_dns_domain::dns_record::{split_txt, SoaPayload};
use zonestore_dns_domain::zone::fqdn;
use zonestore_dns_domain::{resolve_ttl, DomainError, RecordPayload, ZoneRecord};

/// Build the record for one validated payload.
///
/// `serial` is only used for SOA payloads.
pub fn decode_payload(
    owner: &Name,
    payload: &RecordPayload,
    ttl_floor: u32,
    serial: u32,
) -> Result<Record, DomainError> {
    let kind = payload.record_type().as_str();
    let missing = || DomainError::invalid_record(kind, "missing ip");

    let rdata = match payload {
        RecordPayload::A(p) => RData::A(A(p.ip.ok_or_else(missing)?)),
        RecordPayload::AAAA(p) => RData::AAAA(AAAA(p.ip.ok_or_else(missing)?)),
        RecordPayload::CNAME(p) => RData::CNAME(CNAME(parse_name(kind, &p.target)?)),
        RecordPayload::TXT(p) => RData::TXT(TXT::from_bytes(split_txt(&p.text))),
        RecordPayload::NS(p) => RData::NS(NS(parse_name(kind, &p.host)?)),
        RecordPayload::MX(p) => RData::MX(MX::new(p.preference, parse_name(kind, &p.host)?)),
        RecordPayload::SRV(p) => RData::SRV(SRV::new(
            p.priority,
            p.weight,
            p.port,
            parse_name(kind, &p.target)?,
        )),
        RecordPayload::SOA(p) => RData::SOA(SOA::new(
            parse_name(kind, &p.ns)?,
            parse_name(kind, &p.mbox)?,
            serial,
            soa_timer(kind, "refresh", p.refresh)?,
            soa_timer(kind, "retry", p.retry)?,
            soa_timer(kind, "expire", p.expire)?,
            p.minttl,
        )),
    };

    Ok(Record::from_rdata(
        owner.clone(),
        resolve_ttl(ttl_floor, payload.ttl()),
        rdata,
    ))
}

/// Decode stored rows, skipping the ones that cannot be decoded.
pub fn decode_rows(owner: &Name, rows: &[ZoneRecord], ttl_floor: u32, serial: u32) -> Vec<Record> {
    rows.iter()
        .filter_map(|row| {
            match row
                .payload()
                .and_then(|payload| decode_payload(owner, &payload, ttl_floor, serial))
            {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(
                        owner = %owner,
                        host = %row.name,
                        record_type = %row.record_type,
                        error = %e,
                        "Skipping malformed stored record"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Default SOA answered for a zone without a stored one.
///
/// The minimum TTL is the resolved TTL floor.
pub fn synthesized_soa(owner: &Name, ttl_floor: u32, serial: u32) -> Option<Record> {
    let minttl = resolve_ttl(ttl_floor, 0);
    let payload = RecordPayload::SOA(SoaPayload::synthesized(&owner.to_ascii(), minttl));

    match decode_payload(owner, &payload, ttl_floor, serial) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(owner = %owner, error = %e, "Cannot synthesize SOA");
            None
        }
    }
}

/// Host named by an MX or SRV record.
pub fn glue_target(record: &Record) -> Option<&Name> {
    match record.data() {
        RData::MX(mx) => Some(mx.exchange()),
        RData::SRV(srv) => Some(srv.target()),
        _ => None,
    }
}

fn soa_timer(kind: &'static str, field: &str, value: u32) -> Result<i32, DomainError> {
    i32::try_from(value)
        .map_err(|_| DomainError::invalid_record(kind, format!("{} out of range: {}", field, value)))
}

fn parse_name(kind: &'static str, name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(fqdn(name.trim()))
        .map_err(|e| DomainError::invalid_record(kind, format!("bad name {:?}: {}", name, e)))
}
