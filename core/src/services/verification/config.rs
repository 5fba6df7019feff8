//! Configuration for the verification services

use chrono::Duration;
use ts_shared::config::{DeliveryMode, VerificationConfig, MAX_TTL_MINUTES};

use crate::domain::entities::verification_code::{
    CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};

/// Configuration for issuance and validation
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Whether codes are dispatched or handed back to the caller
    pub mode: DeliveryMode,
    /// Number of digits in a generated code
    pub code_length: usize,
    /// How long a code stays valid after issuance
    pub ttl: Duration,
    /// Maximum number of verification attempts allowed
    pub max_attempts: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            mode: DeliveryMode::Developer,
            code_length: CODE_LENGTH,
            ttl: Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            mode: config.mode,
            code_length: config.code_length,
            ttl: Duration::minutes(config.ttl_minutes.clamp(1, MAX_TTL_MINUTES)),
            max_attempts: config.max_attempts,
        }
    }
}
