//! Verification service module for email one-time-code login
//!
//! This module provides the complete one-time-code workflow:
//! - Random code generation
//! - A concurrency-safe store holding one record per identity
//! - Issuance with explicit developer/production delivery
//! - Validation enforcing expiry, single use and the attempt budget
//! - An optional reaper that purges abandoned, expired codes

mod config;
mod generator;
mod issuance;
mod reaper;
mod store;
mod traits;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use generator::RandomCodeGenerator;
pub use issuance::IssuanceService;
pub use reaper::ExpiryReaper;
pub use store::InMemoryCodeStore;
pub use traits::{CodeGenerator, CodeStore, Disposition, Notifier};
pub use types::{IssueReceipt, ValidationOutcome};
pub use validation::ValidationService;
