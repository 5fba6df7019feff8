//! Inference Module
//!
//! Client for the hosted object-detection model that classifies beach and
//! ocean waste in uploaded images.

pub mod client;
pub mod error;
pub mod types;

pub use client::InferenceClient;
pub use error::ProxyError;
pub use types::{ImageKind, ScanReport, ScanUpload};
