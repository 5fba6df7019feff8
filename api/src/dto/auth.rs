use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Email address; surrounding whitespace and case are ignored
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
    /// The issued code, only returned in developer mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,

    /// Code as received; a wrong length counts as a failed attempt
    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
}

/// Body returned when a code is not accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeFailure {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
    pub timestamp: DateTime<Utc>,
}
