//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CodeGenerator, CodeStore, Disposition, ExpiryReaper, InMemoryCodeStore, IssuanceService,
    IssueReceipt, Notifier, RandomCodeGenerator, ValidationOutcome, ValidationService,
    VerificationServiceConfig,
};
