use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zonestore_dns_application::services::ZoneCache;

/// Reloads the zone list on a fixed period, starting immediately.
pub struct ZoneRefreshJob {
    zone_cache: Arc<ZoneCache>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ZoneRefreshJob {
    pub fn new(zone_cache: Arc<ZoneCache>, interval: Duration) -> Self {
        Self {
            zone_cache,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting zone refresh job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ZoneRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.zone_cache.refresh().await {
                            Ok(zones) => debug!(zones, "Periodic zone refresh completed"),
                            Err(e) => warn!(error = %e, "Periodic zone refresh failed"),
                        }
                    }
                }
            }
        })
    }
}
