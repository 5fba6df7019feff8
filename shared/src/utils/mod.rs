//! Common utility functions

pub mod email;

// Re-export commonly used utilities
pub use email::{is_valid_email, mask_email, normalize_identity};
