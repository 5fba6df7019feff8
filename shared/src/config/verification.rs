//! One-time-code configuration

use serde::{Deserialize, Serialize};

use super::{parse_var, read_var, ConfigError, DeliveryMode, Lookup};

/// Longest accepted code lifetime (one year)
pub const MAX_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Settings for issuing and validating one-time codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Delivery mode selected at startup
    #[serde(default)]
    pub mode: DeliveryMode,

    /// Number of digits in a code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Minutes a code stays valid after issuance
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Failed attempts tolerated before the code is discarded
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Interval of the expired-code reaper; `None` disables it
    #[serde(default)]
    pub reaper_interval_secs: Option<u64>,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            mode: DeliveryMode::default(),
            code_length: default_code_length(),
            ttl_minutes: default_ttl_minutes(),
            max_attempts: default_max_attempts(),
            reaper_interval_secs: None,
        }
    }
}

impl VerificationConfig {
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let mode = match read_var(lookup, "OTC_DELIVERY_MODE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "OTC_DELIVERY_MODE".to_string(),
                value: raw,
            })?,
            None => DeliveryMode::default(),
        };

        let reaper_interval_secs = match read_var(lookup, "OTC_REAPER_INTERVAL_SECS") {
            Some(_) => Some(parse_var(lookup, "OTC_REAPER_INTERVAL_SECS", 0u64)?),
            None => None,
        };

        Ok(Self {
            mode,
            code_length: parse_var(lookup, "OTC_CODE_LENGTH", default_code_length())?,
            ttl_minutes: parse_var(lookup, "OTC_TTL_MINUTES", default_ttl_minutes())?,
            max_attempts: parse_var(lookup, "OTC_MAX_ATTEMPTS", default_max_attempts())?,
            reaper_interval_secs,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 || self.code_length > 12 {
            return Err(ConfigError::Invalid(format!(
                "OTC_CODE_LENGTH must be between 1 and 12, got {}",
                self.code_length
            )));
        }
        if self.ttl_minutes <= 0 || self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "OTC_TTL_MINUTES must be between 1 and {}, got {}",
                MAX_TTL_MINUTES, self.ttl_minutes
            )));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "OTC_MAX_ATTEMPTS must be at least 1".to_string(),
            ));
        }
        if self.reaper_interval_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "OTC_REAPER_INTERVAL_SECS must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_code_length() -> usize {
    6
}

fn default_ttl_minutes() -> i64 {
    10
}

fn default_max_attempts() -> u32 {
    5
}
