//! Shared utilities and common types for the TideScan server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response envelope and error codes
//! - Email identity helpers (normalization, validation, masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CorsConfig, DeliveryMode, InferenceConfig, LogFormat,
    LoggingConfig, ServerConfig, SmtpConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::email;
