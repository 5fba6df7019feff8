//! SMTP notifier configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{parse_var, read_var, ConfigError, Lookup};

/// Credentials and sender identity for the email notifier
#[derive(Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP submission port (STARTTLS)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user
    pub username: String,

    /// Login password
    #[serde(skip_serializing, default)]
    pub password: String,

    /// Sender address, defaults to the login user
    pub from: String,

    /// Product name used in the subject line and body
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl SmtpConfig {
    /// Load SMTP settings
    ///
    /// Returns `Ok(None)` when `SMTP_HOST` is unset. Once a host is given the
    /// login credentials become mandatory.
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Option<Self>, ConfigError> {
        let Some(host) = read_var(lookup, "SMTP_HOST") else {
            return Ok(None);
        };

        let username = read_var(lookup, "SMTP_USERNAME").ok_or_else(|| ConfigError::Missing {
            key: "SMTP_USERNAME".to_string(),
        })?;
        let password = read_var(lookup, "SMTP_PASSWORD").ok_or_else(|| ConfigError::Missing {
            key: "SMTP_PASSWORD".to_string(),
        })?;
        let from = read_var(lookup, "SMTP_FROM").unwrap_or_else(|| username.clone());

        Ok(Some(Self {
            host,
            port: parse_var(lookup, "SMTP_PORT", default_port())?,
            username,
            password,
            from,
            app_name: read_var(lookup, "APP_NAME").unwrap_or_else(default_app_name),
        }))
    }
}

fn default_port() -> u16 {
    587
}

fn default_app_name() -> String {
    String::from("TideScan")
}
