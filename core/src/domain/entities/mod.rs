//! Domain entities representing core business objects.

pub mod verification_code;

// Re-export commonly used types
pub use verification_code::{
    VerificationRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
