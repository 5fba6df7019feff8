//! # TideScan Core
//!
//! One-time-code (OTC) engine for the TideScan backend.
//! This crate contains the verification record entity, the code store,
//! the issuance and validation services, and the error types that the
//! HTTP layer maps onto responses.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
