//! Periodic purge of expired codes
//!
//! Validation only discovers expiry lazily, so a code that is issued and
//! never checked again would otherwise stay in memory until the identity
//! asks for a new one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::traits::CodeStore;

/// Background task removing expired records from a [`CodeStore`]
pub struct ExpiryReaper<S: CodeStore + 'static> {
    store: Arc<S>,
    interval: Duration,
}

impl<S: CodeStore + 'static> ExpiryReaper<S> {
    pub fn new(store: Arc<S>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run a single purge pass
    pub fn run_once(&self, now: DateTime<Utc>) -> usize {
        let purged = self.store.purge_expired(now);
        if purged > 0 {
            info!(
                purged,
                remaining = self.store.len(),
                event = "otc_reaped",
                "Purged expired verification codes"
            );
        } else {
            debug!("No expired verification codes to purge");
        }
        purged
    }

    /// Spawn the reaper on the current tokio runtime
    ///
    /// The first pass runs one full interval after spawning. Abort the
    /// returned handle to stop it.
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting verification code reaper"
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.run_once(Utc::now());
            }
        })
    }
}
