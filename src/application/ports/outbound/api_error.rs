//! Errors surfaced by the character backend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend refused the credentials (401/403)
    #[error("Authentication failed (HTTP {0})")]
    Authentication(u16),
    /// No response came back at all
    #[error("Backend unreachable: {0}")]
    Unavailable(String),
    #[error("Backend rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Could not decode backend response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}
