//! # Infrastructure Layer
//!
//! Concrete implementations of the outbound integrations used by the
//! TideScan backend.
//!
//! ## Architecture
//!
//! - **Notifier**: delivery of one-time codes, either over SMTP or to the log
//! - **Inference**: HTTP client for the hosted waste-detection model behind `/scan`

/// Notifier module - verification code delivery
pub mod notifier;

/// Inference module - object-detection proxy client
pub mod inference;

pub use inference::{ImageKind, InferenceClient, ProxyError, ScanReport, ScanUpload};
pub use notifier::{build_notifier, LogNotifier, NotifierError, SmtpNotifier};
