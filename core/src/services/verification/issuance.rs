//! Code issuance

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use ts_shared::config::DeliveryMode;
use ts_shared::utils::email::{is_valid_email, mask_email, normalize_identity};

use crate::errors::{IssuanceError, IssuanceResult};

use super::config::VerificationServiceConfig;
use super::generator::RandomCodeGenerator;
use super::traits::{CodeGenerator, CodeStore, Notifier};
use super::types::IssueReceipt;

/// Creates codes, stores them and hands them to the notifier
pub struct IssuanceService<S: CodeStore, N: Notifier + ?Sized> {
    /// Store holding the active code per identity
    store: Arc<S>,
    /// Notifier used in production mode
    notifier: Arc<N>,
    /// Source of fresh codes
    generator: Arc<dyn CodeGenerator>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: CodeStore, N: Notifier + ?Sized> IssuanceService<S, N> {
    /// Create a new issuance service using the OS-backed random generator
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            notifier,
            generator: Arc::new(RandomCodeGenerator::new()),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn mode(&self) -> DeliveryMode {
        self.config.mode
    }

    /// Issue a fresh code to an identity
    ///
    /// This method:
    /// 1. Normalizes and checks the identity
    /// 2. Generates a new code
    /// 3. Stores it, replacing any previous code and its attempt count
    /// 4. Dispatches it (production) or surfaces it in the receipt (developer)
    ///
    /// A failed dispatch leaves the stored code in place; the next `issue`
    /// call overwrites it.
    pub async fn issue(&self, identity: &str) -> IssuanceResult<IssueReceipt> {
        let identity = normalize_identity(identity);
        let masked = mask_email(&identity);

        if !is_valid_email(&identity) {
            warn!(
                identity = %masked,
                event = "otc_invalid_identity",
                "Rejected code request for malformed email"
            );
            return Err(IssuanceError::InvalidIdentity);
        }

        let code = self.generator.generate(self.config.code_length);
        let record = self.store.put(&identity, &code, self.config.ttl);

        info!(
            identity = %masked,
            event = "otc_issued",
            expires_at = %record.expires_at,
            mode = %self.config.mode,
            "Issued new verification code"
        );

        let mut receipt = IssueReceipt {
            identity,
            code,
            expires_at: record.expires_at,
            dispatched: false,
            message_id: None,
            mode: self.config.mode,
        };

        match self.config.mode {
            DeliveryMode::Developer => {
                debug!(
                    identity = %masked,
                    code = %receipt.code,
                    "Developer mode: skipping dispatch"
                );
            }
            DeliveryMode::Production => {
                let message_id = self
                    .notifier
                    .dispatch(&receipt.identity, &receipt.code)
                    .await
                    .map_err(|reason| {
                        error!(
                            identity = %masked,
                            error = %reason,
                            event = "otc_dispatch_failed",
                            "Failed to dispatch verification code"
                        );
                        IssuanceError::DispatchFailed { reason }
                    })?;

                info!(
                    identity = %masked,
                    message_id = %message_id,
                    event = "otc_dispatched",
                    "Verification code dispatched"
                );
                receipt.dispatched = true;
                receipt.message_id = Some(message_id);
            }
        }

        Ok(receipt)
    }
}
