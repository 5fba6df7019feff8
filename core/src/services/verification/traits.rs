//! Traits for code generation, storage and notifier integration

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::verification_code::VerificationRecord;

/// Trait for delivering a code to its owner (email, log, ...)
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a verification code to an identity, returning a message id
    async fn dispatch(&self, identity: &str, code: &str) -> Result<String, String>;
}

/// Trait for producing fresh codes
pub trait CodeGenerator: Send + Sync {
    /// Produce exactly `length` decimal digits
    fn generate(&self, length: usize) -> String;
}

/// What to do with a record once an [`CodeStore::update`] closure returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Keep,
    Remove,
}

/// Keyed store holding at most one record per identity
///
/// Every method is atomic with respect to other calls for the same identity.
/// Identities are expected to be normalized by the caller.
pub trait CodeStore: Send + Sync {
    /// Store a fresh record, replacing any existing one
    fn put(&self, identity: &str, code: &str, ttl: Duration) -> VerificationRecord;

    /// Copy of the current record, if any
    fn get(&self, identity: &str) -> Option<VerificationRecord>;

    /// Remove the record; a no-op when absent
    fn delete(&self, identity: &str);

    /// Bump the attempt counter, returning the new count
    fn increment_attempts(&self, identity: &str) -> Option<u32>;

    /// Run `f` against the identity's slot while holding its lock
    ///
    /// The returned [`Disposition`] is applied before the lock is released,
    /// so check-then-mutate sequences cannot interleave. `f` must not call
    /// back into the store.
    fn update<R, F>(&self, identity: &str, f: F) -> R
    where
        F: FnOnce(Option<&mut VerificationRecord>) -> (R, Disposition);

    /// Remove every record expired at `now`, returning how many were dropped
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of live records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
