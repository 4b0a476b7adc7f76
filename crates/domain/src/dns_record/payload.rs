//! Stored record payloads.
//!
//! Each record kind is persisted as a JSON document. Unknown fields are
//! ignored. A required field that is absent, empty or of the wrong JSON type
//! makes the payload invalid. An unusable `ttl` is read as unset.

use super::RecordType;
use crate::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Maximum length of one TXT character-string.
pub const TXT_CHUNK_LEN: usize = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct APayload {
    pub ip: Option<Ipv4Addr>,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AaaaPayload {
    pub ip: Option<Ipv6Addr>,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CnamePayload {
    pub target: String,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxtPayload {
    pub text: String,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NsPayload {
    pub host: String,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MxPayload {
    pub host: String,
    pub preference: u16,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SrvPayload {
    pub target: String,
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

/// Stored SOA fields. The serial is never stored; it is computed per response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoaPayload {
    pub ns: String,
    pub mbox: String,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minttl: u32,
    #[serde(deserialize_with = "lenient_ttl", skip_serializing_if = "is_zero")]
    pub ttl: u32,
}

impl SoaPayload {
    pub const DEFAULT_REFRESH: u32 = 86400;
    pub const DEFAULT_RETRY: u32 = 7200;
    pub const DEFAULT_EXPIRE: u32 = 3600;
    pub const DEFAULT_MINTTL: u32 = 300;

    /// SOA written by zone creation.
    pub fn zone_default() -> Self {
        Self {
            ns: "localhost.".to_string(),
            mbox: "localhost.".to_string(),
            refresh: Self::DEFAULT_REFRESH,
            retry: Self::DEFAULT_RETRY,
            expire: Self::DEFAULT_EXPIRE,
            minttl: Self::DEFAULT_MINTTL,
            ttl: 0,
        }
    }

    /// SOA answered for a zone that has no stored SOA row.
    pub fn synthesized(qname: &str, minttl: u32) -> Self {
        let suffix = if qname == "." { "" } else { qname };
        Self {
            ns: format!("ns1.{}", suffix),
            mbox: format!("hostmaster.{}", suffix),
            refresh: Self::DEFAULT_REFRESH,
            retry: Self::DEFAULT_RETRY,
            expire: Self::DEFAULT_EXPIRE,
            minttl,
            ttl: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPayload {
    A(APayload),
    AAAA(AaaaPayload),
    CNAME(CnamePayload),
    TXT(TxtPayload),
    NS(NsPayload),
    MX(MxPayload),
    SRV(SrvPayload),
    SOA(SoaPayload),
}

impl RecordPayload {
    /// Parse and validate a stored payload of the given kind.
    pub fn parse(record_type: RecordType, rdata: &str) -> Result<Self, DomainError> {
        let payload = match record_type {
            RecordType::A => RecordPayload::A(from_json(record_type, rdata)?),
            RecordType::AAAA => RecordPayload::AAAA(from_json(record_type, rdata)?),
            RecordType::CNAME => RecordPayload::CNAME(from_json(record_type, rdata)?),
            RecordType::TXT => RecordPayload::TXT(from_json(record_type, rdata)?),
            RecordType::NS => RecordPayload::NS(from_json(record_type, rdata)?),
            RecordType::MX => RecordPayload::MX(from_json(record_type, rdata)?),
            RecordType::SRV => RecordPayload::SRV(from_json(record_type, rdata)?),
            RecordType::SOA => RecordPayload::SOA(from_json(record_type, rdata)?),
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            RecordPayload::A(_) => RecordType::A,
            RecordPayload::AAAA(_) => RecordType::AAAA,
            RecordPayload::CNAME(_) => RecordType::CNAME,
            RecordPayload::TXT(_) => RecordType::TXT,
            RecordPayload::NS(_) => RecordType::NS,
            RecordPayload::MX(_) => RecordType::MX,
            RecordPayload::SRV(_) => RecordType::SRV,
            RecordPayload::SOA(_) => RecordType::SOA,
        }
    }

    /// The record's own TTL, `0` when unset.
    pub fn ttl(&self) -> u32 {
        match self {
            RecordPayload::A(p) => p.ttl,
            RecordPayload::AAAA(p) => p.ttl,
            RecordPayload::CNAME(p) => p.ttl,
            RecordPayload::TXT(p) => p.ttl,
            RecordPayload::NS(p) => p.ttl,
            RecordPayload::MX(p) => p.ttl,
            RecordPayload::SRV(p) => p.ttl,
            RecordPayload::SOA(p) => p.ttl,
        }
    }

    /// Target host of MX and SRV records.
    pub fn target(&self) -> Option<&str> {
        match self {
            RecordPayload::MX(p) => Some(&p.host),
            RecordPayload::SRV(p) => Some(&p.target),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let kind = self.record_type().as_str();
        let missing = |field: &str| DomainError::invalid_record(kind, format!("missing {}", field));

        match self {
            RecordPayload::A(p) if p.ip.is_none() => Err(missing("ip")),
            RecordPayload::AAAA(p) if p.ip.is_none() => Err(missing("ip")),
            RecordPayload::CNAME(p) if is_blank(&p.target) => Err(missing("target")),
            RecordPayload::TXT(p) if p.text.is_empty() => Err(missing("text")),
            RecordPayload::NS(p) if is_blank(&p.host) => Err(missing("host")),
            RecordPayload::MX(p) if is_blank(&p.host) => Err(missing("host")),
            RecordPayload::SRV(p) if is_blank(&p.target) => Err(missing("target")),
            RecordPayload::SOA(p) if is_blank(&p.ns) => Err(missing("ns")),
            RecordPayload::SOA(p) if is_blank(&p.mbox) => Err(missing("mbox")),
            _ => Ok(()),
        }
    }

    pub fn to_json(&self) -> String {
        let value = match self {
            RecordPayload::A(p) => serde_json::to_value(p),
            RecordPayload::AAAA(p) => serde_json::to_value(p),
            RecordPayload::CNAME(p) => serde_json::to_value(p),
            RecordPayload::TXT(p) => serde_json::to_value(p),
            RecordPayload::NS(p) => serde_json::to_value(p),
            RecordPayload::MX(p) => serde_json::to_value(p),
            RecordPayload::SRV(p) => serde_json::to_value(p),
            RecordPayload::SOA(p) => serde_json::to_value(p),
        };
        // Plain structs of strings and integers always serialize.
        value.map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Split TXT text into successive character-strings of at most 255 bytes.
///
/// Text shorter than one chunk (including the empty string) yields a single
/// chunk; concatenating the chunks gives back the input.
pub fn split_txt(text: &str) -> Vec<&[u8]> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return vec![bytes];
    }
    bytes.chunks(TXT_CHUNK_LEN).collect()
}

fn from_json<T>(record_type: RecordType, rdata: &str) -> Result<T, DomainError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(rdata)
        .map_err(|e| DomainError::invalid_record(record_type.as_str(), e.to_string()))
}

fn lenient_ttl<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|ttl| u32::try_from(ttl).ok())
        .unwrap_or(0))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
