//! Domain-specific error types.
//!
//! Messages here are for logs; the presentation layer chooses the wording
//! and status code that reach clients.

use thiserror::Error;

/// Reasons a submitted code was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No active verification code")]
    NotFound,

    #[error("Verification code expired")]
    Expired,

    #[error("Maximum verification attempts exceeded")]
    TooManyAttempts,

    #[error("Verification code mismatch (attempt {attempts}, {remaining} remaining)")]
    Mismatch { attempts: u32, remaining: u32 },
}

/// Failures while issuing a code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssuanceError {
    #[error("Invalid email address")]
    InvalidIdentity,

    #[error("Failed to dispatch verification code: {reason}")]
    DispatchFailed { reason: String },
}

pub type IssuanceResult<T> = Result<T, IssuanceError>;
