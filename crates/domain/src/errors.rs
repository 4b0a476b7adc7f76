use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid {record_type} record payload: {reason}")]
    InvalidRecord {
        record_type: &'static str,
        reason: String,
    },

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn invalid_record(record_type: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidRecord {
            record_type,
            reason: reason.into(),
        }
    }

    /// Failures that should surface to the client as SERVFAIL.
    pub fn is_server_failure(&self) -> bool {
        matches!(
            self,
            DomainError::BackendUnavailable(_) | DomainError::QueryTimeout
        )
    }
}
