//! Verification record entity for email-based one-time-code login.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts tolerated per code
pub const MAX_ATTEMPTS: u32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// The single active code issued to an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Normalized (trimmed, lower-cased) email address
    pub identity: String,

    /// The numeric code sent to the user
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,

    /// Number of verification attempts made against this code
    pub attempts: u32,
}

impl VerificationRecord {
    /// Creates a record issued now that lives for `ttl`
    pub fn new(identity: impl Into<String>, code: impl Into<String>, ttl: Duration) -> Self {
        Self::issued(identity, code, ttl, Utc::now())
    }

    /// Creates a record issued at `now` that lives for `ttl`
    ///
    /// An expiry past the representable range saturates.
    pub fn issued(
        identity: impl Into<String>,
        code: impl Into<String>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            identity: identity.into(),
            code: code.into(),
            issued_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            attempts: 0,
        }
    }

    /// Checks if the code has expired at the given instant
    ///
    /// A code is still valid at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Records one verification attempt and returns the new count
    pub fn register_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    /// Whether the attempt budget has been overrun
    pub fn exceeds_attempts(&self, max_attempts: u32) -> bool {
        self.attempts > max_attempts
    }

    /// Constant-time comparison of a supplied code with the stored one
    pub fn matches(&self, supplied: &str) -> bool {
        if self.code.len() != supplied.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), supplied.as_bytes())
    }

    /// Gets the number of remaining verification attempts (0 if exceeded)
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> VerificationRecord {
        VerificationRecord::new(
            "user@example.com",
            "482913",
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
        )
    }

    #[test]
    fn test_new_record() {
        let record = record();

        assert_eq!(record.identity, "user@example.com");
        assert_eq!(record.code.len(), CODE_LENGTH);
        assert_eq!(record.attempts, 0);
        assert_eq!(
            record.expires_at - record.issued_at,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
        );
        assert!(!record.is_expired());
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let record = VerificationRecord::issued("a@b.io", "123456", Duration::minutes(10), now);

        assert!(!record.is_expired_at(now + Duration::minutes(10)));
        assert!(record.is_expired_at(now + Duration::minutes(10) + Duration::milliseconds(1)));
    }

    #[test]
    fn test_expiry_saturates_on_overflow() {
        let now = Utc::now();
        let ttl = Duration::days(365_000_000);
        let record = VerificationRecord::issued("a@b.io", "123456", ttl, now);

        assert_eq!(record.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!record.is_expired_at(now));
    }

    #[test]
    fn test_register_attempt_and_budget() {
        let mut record = record();

        for expected in 1..=MAX_ATTEMPTS {
            assert_eq!(record.register_attempt(), expected);
            assert!(!record.exceeds_attempts(MAX_ATTEMPTS));
        }
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);

        record.register_attempt();
        assert!(record.exceeds_attempts(MAX_ATTEMPTS));
        assert_eq!(record.remaining_attempts(MAX_ATTEMPTS), 0);
    }

    #[test]
    fn test_matches_is_exact() {
        let record = record();

        assert!(record.matches("482913"));
        assert!(!record.matches("482914"));
        assert!(!record.matches("48291"));
        assert!(!record.matches("4829130"));
        assert!(!record.matches(" 482913"));
    }

    #[test]
    fn test_serialization() {
        let record = record();

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: VerificationRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
