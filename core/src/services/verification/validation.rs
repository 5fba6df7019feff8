//! Code validation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use ts_shared::utils::email::{mask_email, normalize_identity};

use super::traits::{CodeStore, Disposition};
use super::types::ValidationOutcome;

/// Checks submitted codes against the store
///
/// Per identity: `NoRecord -> Issued -> {Validated, Expired, Exhausted}`.
/// Every terminal state removes the record.
pub struct ValidationService<S: CodeStore> {
    store: Arc<S>,
    max_attempts: u32,
}

impl<S: CodeStore> ValidationService<S> {
    pub fn new(store: Arc<S>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Validate a code against the current time
    pub fn validate(&self, identity: &str, supplied: &str) -> ValidationOutcome {
        self.validate_at(identity, supplied, Utc::now())
    }

    /// Validate a code as of `now`
    ///
    /// The whole check runs inside one store update, in this order:
    /// expiry, attempt increment, attempt budget, comparison. The budget is
    /// checked before comparing, so the attempt that overruns it fails even
    /// with the right code.
    pub fn validate_at(
        &self,
        identity: &str,
        supplied: &str,
        now: DateTime<Utc>,
    ) -> ValidationOutcome {
        let identity = normalize_identity(identity);
        let max_attempts = self.max_attempts;

        let outcome = self.store.update(&identity, |slot| {
            let Some(record) = slot else {
                return (ValidationOutcome::NotFound, Disposition::Keep);
            };

            if record.is_expired_at(now) {
                return (ValidationOutcome::Expired, Disposition::Remove);
            }

            let attempts = record.register_attempt();
            if record.exceeds_attempts(max_attempts) {
                return (ValidationOutcome::TooManyAttempts, Disposition::Remove);
            }

            if !record.matches(supplied) {
                let remaining = record.remaining_attempts(max_attempts);
                return (
                    ValidationOutcome::Mismatch {
                        attempts,
                        remaining,
                    },
                    Disposition::Keep,
                );
            }

            (ValidationOutcome::Success, Disposition::Remove)
        });

        let masked = mask_email(&identity);
        match outcome {
            ValidationOutcome::Success => info!(
                identity = %masked,
                event = "otc_verified",
                "Verification code accepted"
            ),
            ValidationOutcome::Mismatch { attempts, remaining } => warn!(
                identity = %masked,
                event = "otc_mismatch",
                attempts,
                remaining,
                "Verification code mismatch"
            ),
            other => warn!(
                identity = %masked,
                event = "otc_rejected",
                outcome = other.as_str(),
                "Verification code rejected"
            ),
        }

        outcome
    }
}
