use super::{RecordPayload, RecordType};
use crate::DomainError;
use std::sync::Arc;

/// Class code for INTERNET.
pub const CLASS_INET: u16 = 1;

/// A raw row as held by the zone store.
///
/// `name` is the host key relative to the zone (`record.`, or `@` for the
/// apex); the zone itself is part of the storage key, not of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: u16,
    pub rdata: Arc<str>,
}

impl ZoneRecord {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType, rdata: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: CLASS_INET,
            rdata: rdata.into(),
        }
    }

    pub fn from_payload(name: impl Into<Arc<str>>, payload: &RecordPayload) -> Self {
        Self::new(name, payload.record_type(), payload.to_json())
    }

    pub fn with_class(mut self, class: u16) -> Self {
        self.class = class;
        self
    }

    pub fn payload(&self) -> Result<RecordPayload, DomainError> {
        RecordPayload::parse(self.record_type, &self.rdata)
    }
}
