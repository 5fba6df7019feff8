//! Notifier Module
//!
//! Implementations of the core `Notifier` trait used to deliver one-time
//! codes to their owners.
//!
//! ## Features
//!
//! - **SMTP**: production delivery over an authenticated STARTTLS relay
//! - **Log**: development delivery that only records the dispatch
//! - **Security**: email addresses are masked in every log line

use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use ts_core::services::verification::Notifier;
use ts_shared::config::SmtpConfig;

pub mod log;
pub mod smtp;

pub use log::LogNotifier;
pub use smtp::SmtpNotifier;

/// Failures raised while building or sending a notification
///
/// These are flattened into a string at the core boundary.
#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Create the notifier matching the configuration
///
/// An SMTP notifier when SMTP settings are present, otherwise a
/// [`LogNotifier`].
pub fn build_notifier(smtp: Option<&SmtpConfig>) -> Result<Arc<dyn Notifier>, NotifierError> {
    match smtp {
        Some(config) => {
            let notifier = SmtpNotifier::new(config)?;
            info!(
                host = %config.host,
                port = config.port,
                "Using SMTP notifier"
            );
            Ok(Arc::new(notifier))
        }
        None => {
            info!("SMTP not configured, using log notifier");
            Ok(Arc::new(LogNotifier::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "secret".to_string(),
            from: "mailer@example.com".to_string(),
            app_name: "TideScan".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_log_notifier_without_smtp() {
        let notifier = build_notifier(None).unwrap();
        let message_id = notifier.dispatch("user@example.com", "123456").await.unwrap();
        assert!(message_id.starts_with("log-"));
    }

    #[tokio::test]
    async fn test_build_smtp_notifier() {
        assert!(build_notifier(Some(&smtp_config())).is_ok());
    }

    #[test]
    fn test_build_smtp_notifier_bad_sender() {
        let config = SmtpConfig {
            from: "not an address".to_string(),
            ..smtp_config()
        };
        assert!(matches!(
            build_notifier(Some(&config)),
            Err(NotifierError::Address(_))
        ));
    }
}
