//! Types for verification service results

use chrono::{DateTime, Utc};
use ts_shared::config::DeliveryMode;

use crate::errors::ValidationError;

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssueReceipt {
    /// Normalized identity the code was issued to
    pub identity: String,
    /// The generated code
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Whether the notifier was invoked and accepted the message
    pub dispatched: bool,
    /// Message id reported by the notifier
    pub message_id: Option<String>,
    /// Delivery mode the code was issued under
    pub mode: DeliveryMode,
}

impl IssueReceipt {
    /// The code to hand back to the caller, only in developer mode
    pub fn dev_code(&self) -> Option<&str> {
        self.mode.is_developer().then_some(self.code.as_str())
    }
}

/// Outcome of a single validation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Code matched; the record has been consumed
    Success,
    /// No code is outstanding for the identity
    NotFound,
    /// The code had expired; the record has been removed
    Expired,
    /// The attempt budget was overrun; the record has been removed
    TooManyAttempts,
    /// Wrong code; the record is kept with its attempt counter bumped
    Mismatch { attempts: u32, remaining: u32 },
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success)
    }

    /// Short label used in structured logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationOutcome::Success => "success",
            ValidationOutcome::NotFound => "not_found",
            ValidationOutcome::Expired => "expired",
            ValidationOutcome::TooManyAttempts => "too_many_attempts",
            ValidationOutcome::Mismatch { .. } => "mismatch",
        }
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationOutcome::Success => Ok(()),
            ValidationOutcome::NotFound => Err(ValidationError::NotFound),
            ValidationOutcome::Expired => Err(ValidationError::Expired),
            ValidationOutcome::TooManyAttempts => Err(ValidationError::TooManyAttempts),
            ValidationOutcome::Mismatch {
                attempts,
                remaining,
            } => Err(ValidationError::Mismatch {
                attempts,
                remaining,
            }),
        }
    }
}
