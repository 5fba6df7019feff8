//! Log notifier for development and testing
//!
//! Records dispatches in the application log instead of sending email.
//! `build_notifier` falls back to it when SMTP is not configured, which
//! startup only allows in developer mode.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;
use ts_core::services::verification::Notifier;
use ts_shared::utils::email::mask_email;

/// Notifier that writes to the log and counts dispatches
#[derive(Debug, Default)]
pub struct LogNotifier {
    dispatched: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dispatches so far
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn dispatch(&self, identity: &str, _code: &str) -> Result<String, String> {
        let n = self.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            identity = %mask_email(identity),
            message_id = n,
            "Verification code delivered to log"
        );
        Ok(format!("log-{}", n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_counts() {
        let notifier = LogNotifier::new();
        assert_eq!(notifier.dispatch_count(), 0);

        assert_eq!(notifier.dispatch("a@example.com", "111111").await.unwrap(), "log-1");
        assert_eq!(notifier.dispatch("b@example.com", "222222").await.unwrap(), "log-2");
        assert_eq!(notifier.dispatch_count(), 2);
    }
}
