//! Upstream inference endpoint configuration

use serde::{Deserialize, Serialize};

use super::{parse_var, read_var, ConfigError, Lookup};

/// Settings for the hosted object-detection model behind `/scan`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InferenceConfig {
    /// API key passed as a query parameter
    #[serde(skip_serializing, default)]
    pub api_key: String,

    /// Model identifier appended to the base URL
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Base URL of the inference service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum confidence, 0-100
    #[serde(default = "default_confidence")]
    pub confidence: u8,

    /// Maximum box overlap, 0-100
    #[serde(default = "default_overlap")]
    pub overlap: u8,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model_id: default_model_id(),
            base_url: default_base_url(),
            confidence: default_confidence(),
            overlap: default_overlap(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl InferenceConfig {
    pub fn from_lookup(lookup: &impl Lookup) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: read_var(lookup, "ROBOFLOW_API_KEY").unwrap_or_default(),
            model_id: read_var(lookup, "ROBOFLOW_MODEL_ID").unwrap_or_else(default_model_id),
            base_url: read_var(lookup, "ROBOFLOW_BASE_URL").unwrap_or_else(default_base_url),
            confidence: parse_var(lookup, "CONF", default_confidence())?,
            overlap: parse_var(lookup, "OVER", default_overlap())?,
            timeout_secs: parse_var(lookup, "INFERENCE_TIMEOUT_SECS", default_timeout_secs())?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.confidence > 100 || self.overlap > 100 {
            return Err(ConfigError::Invalid(
                "CONF and OVER must be between 0 and 100".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "INFERENCE_TIMEOUT_SECS must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Full URL of the model endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model_id)
    }
}

fn default_model_id() -> String {
    String::from("ocean-waste/2")
}

fn default_base_url() -> String {
    String::from("https://serverless.roboflow.com")
}

fn default_confidence() -> u8 {
    40
}

fn default_overlap() -> u8 {
    50
}

fn default_timeout_secs() -> u64 {
    30
}
