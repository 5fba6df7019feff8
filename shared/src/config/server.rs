//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{parse_var, read_var, ConfigError, Lookup};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Maximum upload size accepted by `/scan`, in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8000,
            workers: 0, // Use all CPU cores
            max_payload_size: default_max_payload_size(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: read_var(lookup, "SERVER_HOST").unwrap_or(defaults.host),
            port: parse_var(lookup, "SERVER_PORT", defaults.port)?,
            workers: parse_var(lookup, "SERVER_WORKERS", defaults.workers)?,
            max_payload_size: parse_var(lookup, "MAX_PAYLOAD_SIZE", defaults.max_payload_size)?,
        })
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Max age for preflight cache in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        let allowed_origins = read_var(lookup, "CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty() && origin != "*")
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            allowed_origins,
            max_age: parse_var(lookup, "CORS_MAX_AGE", default_max_age())?,
        })
    }

    /// Whether every origin is accepted
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

fn default_max_payload_size() -> usize {
    10 * 1024 * 1024 // 10 MB
}

fn default_max_age() -> usize {
    3600
}
