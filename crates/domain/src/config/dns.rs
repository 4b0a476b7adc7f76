use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Responder-wide TTL floor. `0` leaves it unset.
    #[serde(default)]
    pub ttl: u32,

    /// Overall per-query deadline in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Zone cache staleness threshold in seconds. Also the period of the
    /// background refresh job.
    #[serde(default = "default_zone_refresh_interval")]
    pub zone_refresh_interval: u64,

    #[serde(default = "default_true")]
    pub background_refresh: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            ttl: 0,
            query_timeout: default_query_timeout(),
            zone_refresh_interval: default_zone_refresh_interval(),
            background_refresh: true,
        }
    }
}

impl DnsConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout)
    }

    pub fn zone_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.zone_refresh_interval)
    }
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_zone_refresh_interval() -> u64 {
    300
}

fn default_true() -> bool {
    true
}
