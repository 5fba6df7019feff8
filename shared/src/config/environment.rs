//! Delivery mode and logging configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{read_var, ConfigError, Lookup};

/// How issued codes reach the user
///
/// The mode is selected explicitly at startup. It is never inferred from
/// whether notifier credentials happen to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Dispatch is skipped and the code is returned to the caller
    #[default]
    Developer,
    /// Codes are sent through the configured notifier
    Production,
}

impl DeliveryMode {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, DeliveryMode::Production)
    }

    /// Check if running in developer mode
    pub fn is_developer(&self) -> bool {
        matches!(self, DeliveryMode::Developer)
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Developer => write!(f, "developer"),
            DeliveryMode::Production => write!(f, "production"),
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "developer" | "development" | "dev" => Ok(DeliveryMode::Developer),
            "production" | "prod" => Ok(DeliveryMode::Production),
            _ => Err(format!("Invalid delivery mode: {}", s)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive (same syntax as `RUST_LOG`)
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let level = read_var(lookup, "RUST_LOG").unwrap_or_else(|| "info".to_string());
        let format = match read_var(lookup, "LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                value: raw,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self { level, format })
    }
}
