//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Delivery mode selection and logging configuration
//! - `inference` - Upstream image inference endpoint used by `/scan`
//! - `server` - HTTP server and CORS configuration
//! - `smtp` - Email notifier credentials
//! - `verification` - One-time-code lifetime and attempt limits
//!
//! Every section is read through a lookup function so that loading can be
//! exercised in tests without touching the process environment.

pub mod environment;
pub mod inference;
pub mod server;
pub mod smtp;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use environment::{DeliveryMode, LogFormat, LoggingConfig};
pub use inference::InferenceConfig;
pub use server::{CorsConfig, ServerConfig};
pub use smtp::SmtpConfig;
pub use verification::{VerificationConfig, MAX_TTL_MINUTES};

/// Errors raised while loading or validating configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Missing required setting: {key}")]
    Missing { key: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Source of raw configuration values keyed by variable name
pub trait Lookup: Fn(&str) -> Option<String> {}

impl<F: Fn(&str) -> Option<String>> Lookup for F {}

/// Read a variable, treating blank values as unset
pub(crate) fn read_var(lookup: &impl Lookup, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a variable, falling back to `default` when unset
///
/// A value that is present but unparseable is an error rather than a silent
/// fallback.
pub(crate) fn parse_var<T: FromStr>(
    lookup: &impl Lookup,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match read_var(lookup, key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// One-time-code engine configuration
    pub verification: VerificationConfig,

    /// SMTP credentials, absent when no notifier is configured
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,

    /// Upstream inference endpoint
    pub inference: InferenceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
            verification: VerificationConfig::default(),
            smtp: None,
            inference: InferenceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source and validate it
    pub fn from_lookup(lookup: impl Lookup) -> Result<Self, ConfigError> {
        let config = Self {
            server: ServerConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(&lookup)?,
            verification: VerificationConfig::from_lookup(&lookup)?,
            smtp: SmtpConfig::from_lookup(&lookup)?,
            inference: InferenceConfig::from_lookup(&lookup)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.verification.validate()?;
        self.inference.validate()?;

        if self.verification.mode.is_production() && self.smtp.is_none() {
            return Err(ConfigError::Invalid(
                "production delivery mode requires SMTP_HOST, SMTP_USERNAME and SMTP_PASSWORD"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Whether an email notifier has credentials
    pub fn notifier_configured(&self) -> bool {
        self.smtp.is_some()
    }
}
