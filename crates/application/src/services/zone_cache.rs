//! Process-wide snapshot of the zones this responder is authoritative for.
//!
//! Readers load the current snapshot without locking. A refresh builds a new
//! snapshot from the store and swaps it in whole; only one refresh runs at a
//! time.

use crate::ports::ZoneStore;
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use zonestore_dns_domain::zone::{match_zone, normalize_zone};
use zonestore_dns_domain::DomainError;

pub struct ZoneSnapshot {
    zones: Vec<Arc<str>>,
    refreshed_at: Option<Instant>,
}

impl ZoneSnapshot {
    fn empty() -> Self {
        Self {
            zones: Vec::new(),
            refreshed_at: None,
        }
    }

    fn loaded(names: Vec<String>) -> Self {
        let mut zones: Vec<Arc<str>> = names
            .iter()
            .map(|name| Arc::from(normalize_zone(name)))
            .collect();
        zones.sort();
        zones.dedup();

        Self {
            zones,
            refreshed_at: Some(Instant::now()),
        }
    }

    pub fn zones(&self) -> &[Arc<str>] {
        &self.zones
    }

    pub fn is_loaded(&self) -> bool {
        self.refreshed_at.is_some()
    }

    pub fn is_stale(&self, staleness: Duration) -> bool {
        match self.refreshed_at {
            Some(at) => at.elapsed() >= staleness,
            None => true,
        }
    }

    /// Most specific zone containing `qname`.
    pub fn find(&self, qname: &str) -> Option<Arc<str>> {
        let zone = match_zone(qname, self.zones.iter().map(|z| z.as_ref()))?;
        self.zones.iter().find(|z| z.as_ref() == zone).cloned()
    }
}

pub struct ZoneCache {
    store: Arc<dyn ZoneStore>,
    snapshot: ArcSwap<ZoneSnapshot>,
    refresh_lock: Mutex<()>,
    staleness: Duration,
}

impl ZoneCache {
    pub const DEFAULT_STALENESS: Duration = Duration::from_secs(300);

    pub fn new(store: Arc<dyn ZoneStore>) -> Self {
        Self {
            store,
            snapshot: ArcSwap::from_pointee(ZoneSnapshot::empty()),
            refresh_lock: Mutex::new(()),
            staleness: Self::DEFAULT_STALENESS,
        }
    }

    pub fn with_staleness(mut self, staleness: Duration) -> Self {
        self.staleness = staleness;
        self
    }

    /// Current snapshot, without any refresh.
    pub fn snapshot(&self) -> Arc<ZoneSnapshot> {
        self.snapshot.load_full()
    }

    pub fn last_refreshed(&self) -> Option<Instant> {
        self.snapshot.load().refreshed_at
    }

    /// Snapshot to match a query against, refreshing first when stale.
    ///
    /// The first load waits for whichever caller performs it. Once loaded, a
    /// stale snapshot is refreshed by one caller while the others keep using
    /// the old one. A failed refresh leaves the old snapshot in place.
    pub async fn zones(&self) -> Arc<ZoneSnapshot> {
        let current = self.snapshot.load_full();
        if !current.is_stale(self.staleness) {
            return current;
        }

        let _guard = if current.is_loaded() {
            match self.refresh_lock.try_lock() {
                Ok(guard) => guard,
                Err(_) => return current,
            }
        } else {
            self.refresh_lock.lock().await
        };

        let current = self.snapshot.load_full();
        if !current.is_stale(self.staleness) {
            return current;
        }

        if let Err(e) = self.refresh_locked().await {
            debug!(error = %e, "Serving previous zones after failed refresh");
        }
        self.snapshot.load_full()
    }

    /// Reload the zone list from the store. Returns the number of zones.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<usize, DomainError> {
        match self.store.list_zones().await {
            Ok(names) => {
                let snapshot = ZoneSnapshot::loaded(names);
                let count = snapshot.zones.len();
                let previous = self.snapshot.swap(Arc::new(snapshot));

                if previous.zones.len() != count {
                    info!(zones = count, "Zone list refreshed");
                } else {
                    debug!(zones = count, "Zone list refreshed");
                }
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "Zone list refresh failed, keeping previous zones");
                Err(e)
            }
        }
    }
}
