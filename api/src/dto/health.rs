use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Detection model behind `/scan`
    pub model: String,
    /// Whether SMTP credentials are present
    pub notifier_configured: bool,
    /// `developer` or `production`
    pub mode: String,
}
