//! In-memory code store
//!
//! Records live in a sharded concurrent map: operations on one identity lock
//! only that identity's shard, so unrelated identities rarely contend.
//! Nothing survives a restart and nothing is shared between instances.

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::debug;

use crate::domain::entities::verification_code::VerificationRecord;

use super::traits::{CodeStore, Disposition};

/// Process-local [`CodeStore`] backed by a [`DashMap`]
#[derive(Debug, Default)]
pub struct InMemoryCodeStore {
    records: DashMap<String, VerificationRecord>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CodeStore for InMemoryCodeStore {
    fn put(&self, identity: &str, code: &str, ttl: Duration) -> VerificationRecord {
        let record = VerificationRecord::new(identity, code, ttl);
        if self
            .records
            .insert(identity.to_string(), record.clone())
            .is_some()
        {
            debug!(event = "otc_replaced", "Replaced previous verification code");
        }
        record
    }

    fn get(&self, identity: &str) -> Option<VerificationRecord> {
        self.records.get(identity).map(|record| record.value().clone())
    }

    fn delete(&self, identity: &str) {
        self.records.remove(identity);
    }

    fn increment_attempts(&self, identity: &str) -> Option<u32> {
        self.records
            .get_mut(identity)
            .map(|mut record| record.register_attempt())
    }

    fn update<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(Option<&mut VerificationRecord>) -> (R, Disposition),
    {
        match self.records.entry(identity.to_string()) {
            Entry::Occupied(mut entry) => {
                let (result, disposition) = f(Some(entry.get_mut()));
                if disposition == Disposition::Remove {
                    entry.remove();
                }
                result
            }
            Entry::Vacant(_) => f(None).0,
        }
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut purged = 0;
        self.records.retain(|_, record| {
            let keep = !record.is_expired_at(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
