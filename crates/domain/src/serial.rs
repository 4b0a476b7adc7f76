use chrono::{DateTime, Utc};

/// SOA serial for a response produced now.
pub fn soa_serial() -> u32 {
    soa_serial_at(Utc::now())
}

/// Seconds since the Unix epoch, truncated to the 32-bit serial space.
pub fn soa_serial_at(at: DateTime<Utc>) -> u32 {
    at.timestamp() as u32
}
