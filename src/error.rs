// Error types for the portal library.
// Fetch errors never reach page callers: the fetcher falls back instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PortalError>;

#[derive(Debug, Error)]
pub enum PortalError {
    /// Transport failure talking to the external catalog (connect, TLS, body read)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// External catalog answered with a non-2xx status
    #[error("External catalog returned HTTP {status}")]
    Status { status: u16 },

    /// Response body did not match the expected catalog schema
    #[error("Schema mismatch: {0}")]
    Schema(String),

    /// Deny keywords could not be compiled into a pattern
    #[error("Invalid deny pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
