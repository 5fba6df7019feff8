//! SMTP Notifier Implementation
//!
//! Sends verification codes as multipart (plain text + HTML) emails through
//! an authenticated STARTTLS relay.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info};
use ts_core::services::verification::Notifier;
use ts_shared::config::SmtpConfig;
use ts_shared::utils::email::mask_email;
use uuid::Uuid;

use super::NotifierError;

const SMTP_TIMEOUT_SECS: u64 = 15;

/// Email notifier backed by `lettre`
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    app_name: String,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier
    ///
    /// No connection is opened here; the relay is contacted on first dispatch.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifierError> {
        let sender_address: Address = config.from.parse()?;
        let sender = Mailbox::new(Some(config.app_name.clone()), sender_address);

        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .build();

        debug!(
            host = %config.host,
            sender = %mask_email(&config.from),
            "SMTP notifier initialized"
        );

        Ok(Self {
            mailer,
            sender,
            app_name: config.app_name.clone(),
        })
    }

    /// Build the verification email for a recipient
    pub fn build_message(
        &self,
        identity: &str,
        code: &str,
    ) -> Result<(String, Message), NotifierError> {
        let recipient: Mailbox = identity.parse()?;
        let domain = self.sender.email.domain().to_string();
        let message_id = format!("<{}@{}>", Uuid::new_v4(), domain);

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(format!("{} verification code", self.app_name))
            .message_id(Some(message_id.clone()))
            .multipart(MultiPart::alternative_plain_html(
                self.plain_body(code),
                self.html_body(code),
            ))?;

        Ok((message_id, message))
    }

    fn plain_body(&self, code: &str) -> String {
        format!(
            "Your {} verification code is: {}\n\n\
             The code expires in a few minutes and can only be used once.\n\
             If you did not request it, you can ignore this email.\n",
            self.app_name, code
        )
    }

    fn html_body(&self, code: &str) -> String {
        format!(
            "<!DOCTYPE html>\
             <html><body style=\"font-family: sans-serif; color: #0b3954;\">\
             <h2>{app}</h2>\
             <p>Your verification code is:</p>\
             <p style=\"font-size: 32px; font-weight: bold; letter-spacing: 6px;\">{code}</p>\
             <p>The code expires in a few minutes and can only be used once.</p>\
             <p style=\"color: #6c757d;\">If you did not request it, you can ignore this email.</p>\
             </body></html>",
            app = self.app_name,
            code = code
        )
    }

    async fn send(&self, identity: &str, code: &str) -> Result<String, NotifierError> {
        let (message_id, message) = self.build_message(identity, code)?;
        let response = self.mailer.send(message).await?;

        info!(
            identity = %mask_email(identity),
            message_id = %message_id,
            smtp_code = %response.code(),
            "Verification email accepted by relay"
        );
        Ok(message_id)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn dispatch(&self, identity: &str, code: &str) -> Result<String, String> {
        self.send(identity, code).await.map_err(|e| {
            error!(
                identity = %mask_email(identity),
                error = %e,
                "Failed to send verification email"
            );
            e.to_string()
        })
    }
}
